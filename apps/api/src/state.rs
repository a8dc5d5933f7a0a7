use std::sync::Arc;

use crate::providers::{JobListingsProvider, SearchProvider};

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; concurrent tool calls share only these read-only handles.
#[derive(Clone)]
pub struct AppState {
    /// Web-search provider. Default: GoogleSearchClient.
    pub search: Arc<dyn SearchProvider>,
    /// Job-listings provider. `None` when no RapidAPI key is configured.
    pub job_listings: Option<Arc<dyn JobListingsProvider>>,
    /// Public webhook URL advertised by `GET /api/tools`.
    pub tool_server_url: Option<String>,
}
