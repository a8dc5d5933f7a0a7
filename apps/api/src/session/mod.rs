#![allow(dead_code)]

//! Voice session lifecycle: the call state seen by the browser client.
//!
//! Kept apart from the tool webhook: tool calls arrive as plain HTTP requests
//! and never consult this state. The machine only tracks what the client
//! shows (connecting, live, agent speaking, ended) from the platform's event
//! stream.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Connecting,
    Active,
    Speaking,
    Ended,
}

impl SessionState {
    /// A call is live once connected and until it ends.
    pub fn is_live(self) -> bool {
        matches!(self, SessionState::Active | SessionState::Speaking)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Connecting => "connecting",
            SessionState::Active => "active",
            SessionState::Speaking => "speaking",
            SessionState::Ended => "ended",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    StartRequested,
    CallStarted,
    SpeechStarted,
    SpeechEnded,
    VolumeLevel { level: f32 },
    Muted { muted: bool },
    Transcript { role: Speaker, text: String },
    FunctionCall { name: String },
    StopRequested,
    CallEnded,
    Error { message: String },
}

impl SessionEvent {
    fn label(&self) -> &'static str {
        match self {
            SessionEvent::StartRequested => "start_requested",
            SessionEvent::CallStarted => "call_started",
            SessionEvent::SpeechStarted => "speech_started",
            SessionEvent::SpeechEnded => "speech_ended",
            SessionEvent::VolumeLevel { .. } => "volume_level",
            SessionEvent::Muted { .. } => "muted",
            SessionEvent::Transcript { .. } => "transcript",
            SessionEvent::FunctionCall { .. } => "function_call",
            SessionEvent::StopRequested => "stop_requested",
            SessionEvent::CallEnded => "call_ended",
            SessionEvent::Error { .. } => "error",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("event '{event}' is not valid while the session is {from}")]
    InvalidTransition {
        from: SessionState,
        event: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptEntry {
    pub role: Speaker,
    pub text: String,
}

/// One voice call as the client sees it.
#[derive(Debug, Clone, Serialize)]
pub struct VoiceSession {
    state: SessionState,
    muted: bool,
    volume: f32,
    transcript: Vec<TranscriptEntry>,
    last_error: Option<String>,
}

impl Default for VoiceSession {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            muted: false,
            volume: 0.0,
            transcript: Vec::new(),
            last_error: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Applies one event. Rejected events leave the session untouched.
    pub fn apply(&mut self, event: SessionEvent) -> Result<SessionState, SessionError> {
        use SessionEvent as E;
        use SessionState as S;

        let invalid = SessionError::InvalidTransition {
            from: self.state,
            event: event.label(),
        };

        let next = match (self.state, event) {
            (S::Idle | S::Ended, E::StartRequested) => {
                self.muted = false;
                self.volume = 0.0;
                self.last_error = None;
                S::Connecting
            }
            (S::Connecting, E::CallStarted) => S::Active,
            (S::Active, E::SpeechStarted) => S::Speaking,
            (S::Speaking, E::SpeechEnded) => S::Active,
            (S::Connecting | S::Active | S::Speaking, E::StopRequested | E::CallEnded) => {
                self.volume = 0.0;
                S::Ended
            }
            (S::Connecting | S::Active | S::Speaking, E::Error { message }) => {
                self.last_error = Some(message);
                self.volume = 0.0;
                S::Ended
            }
            (state, E::VolumeLevel { level }) if state.is_live() => {
                self.volume = level.clamp(0.0, 1.0);
                state
            }
            (state, E::Muted { muted }) if state.is_live() => {
                self.muted = muted;
                state
            }
            (state, E::Transcript { role, text }) if state.is_live() => {
                self.transcript.push(TranscriptEntry { role, text });
                state
            }
            (state, E::FunctionCall { name }) if state.is_live() => {
                self.transcript.push(TranscriptEntry {
                    role: Speaker::System,
                    text: format!("Processing {name}..."),
                });
                state
            }
            _ => return Err(invalid),
        };

        if next != self.state {
            debug!("Voice session {} -> {}", self.state, next);
        }
        self.state = next;
        Ok(next)
    }
}

/// Feeds events from the platform into `session` until the call ends or the
/// sender goes away. Invalid events are logged and skipped.
pub async fn drive(
    mut session: VoiceSession,
    mut events: mpsc::Receiver<SessionEvent>,
) -> VoiceSession {
    while let Some(event) = events.recv().await {
        match session.apply(event) {
            Ok(SessionState::Ended) => {
                info!("Voice session ended");
                break;
            }
            Ok(_) => {}
            Err(e) => warn!("Ignoring voice session event: {e}"),
        }
    }
    session
}
