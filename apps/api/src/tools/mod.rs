// Tool-call webhook: dispatcher, the two tool handlers and their helpers.
// Handlers never fail outward; every recoverable problem becomes text the
// voice agent can say.

use thiserror::Error;

pub mod arguments;
pub mod definitions;
pub mod dispatcher;
pub mod formatter;
pub mod job_search;
pub mod location;
pub mod web_search;

/// The functions the voice assistant may call, by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    JobSearch,
    WebSearch,
}

impl ToolKind {
    pub const ALL: [ToolKind; 2] = [ToolKind::JobSearch, ToolKind::WebSearch];

    /// Exact, case-sensitive match on the function name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::JobSearch => "job-search",
            ToolKind::WebSearch => "web-search",
        }
    }
}

/// Failures inside a tool handler. Never returned past the handler boundary.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid tool arguments: {0}")]
    InvalidArguments(String),
}
