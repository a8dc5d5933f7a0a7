pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::tools::dispatcher;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Tool-call webhook for the voice assistant
        .route(
            "/api/webhook",
            post(dispatcher::handle_webhook).fallback(dispatcher::handle_method_not_allowed),
        )
        .route("/api/tools", get(dispatcher::handle_tool_definitions))
        .with_state(state)
}
