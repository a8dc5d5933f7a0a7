//! Axum handlers for the tool-call webhook.

use anyhow::anyhow;
use axum::{extract::State, Json};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::task::JoinError;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;
use crate::tools::definitions::tool_definitions;
use crate::tools::job_search::handle_job_search;
use crate::tools::web_search::handle_web_search;
use crate::tools::ToolKind;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct WebhookRequest {
    message: Option<WebhookMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebhookMessage {
    // Kept loose: only the first entry is decoded, later ones may be anything.
    tool_calls: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    /// Echoed back as text whatever its JSON type.
    #[serde(default)]
    id: Value,
    function: Option<FunctionCall>,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    #[serde(default)]
    name: Value,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Serialize)]
pub struct ToolCallResponse {
    pub results: Vec<ToolResult>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub tool_call_id: String,
    pub result: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/webhook
///
/// Executes the first tool call of the envelope and answers with exactly one
/// result for it. Later tool calls in the same envelope are ignored.
pub async fn handle_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ToolCallResponse>, AppError> {
    let call = first_tool_call(&body)?;
    let tool_call_id = value_text(&call.id);
    let (name, arguments) = call
        .function
        .map(|f| (value_text(&f.name), f.arguments))
        .unwrap_or_default();

    let kind = ToolKind::from_name(&name)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown function: {name}")))?;

    info!("Tool call {} -> {}", tool_call_id, kind.name());

    let result = tokio::spawn(run_tool(state, kind, arguments))
        .await
        .map_err(|e| AppError::Internal(anyhow!(join_failure(e))))?;

    Ok(Json(ToolCallResponse {
        results: vec![ToolResult {
            tool_call_id,
            result,
        }],
    }))
}

/// Fallback for every method other than POST on the webhook path.
pub async fn handle_method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// GET /api/tools
pub async fn handle_tool_definitions(State(state): State<AppState>) -> Json<Vec<Value>> {
    Json(tool_definitions(state.tool_server_url.as_deref()))
}

fn first_tool_call(body: &[u8]) -> Result<ToolCall, AppError> {
    let invalid = || AppError::BadRequest("Invalid request format".to_string());

    let request: WebhookRequest = serde_json::from_slice(body).map_err(|_| invalid())?;
    let first = request
        .message
        .and_then(|m| m.tool_calls)
        .and_then(|calls| calls.into_iter().next())
        .filter(|call| !call.is_null())
        .ok_or_else(invalid)?;

    serde_json::from_value(first).map_err(|_| invalid())
}

/// Scalars rendered as text, null and containers as `""`.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

async fn run_tool(state: AppState, kind: ToolKind, arguments: Value) -> String {
    match kind {
        ToolKind::JobSearch => {
            handle_job_search(
                &arguments,
                state.job_listings.as_deref(),
                state.search.as_ref(),
            )
            .await
        }
        ToolKind::WebSearch => handle_web_search(&arguments, state.search.as_ref()).await,
    }
}

fn join_failure(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "tool handler panicked".to_string())
}
