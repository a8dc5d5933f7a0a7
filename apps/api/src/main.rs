mod config;
mod errors;
mod models;
mod providers;
mod routes;
// Client-side call lifecycle model; not mounted on any route.
mod session;
mod state;
mod tools;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::providers::google_search::GoogleSearchClient;
use crate::providers::jsearch::JSearchClient;
use crate::providers::{build_http_client, JobListingsProvider};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Scout API v{}", env!("CARGO_PKG_VERSION"));

    let http = build_http_client(config.http_timeout_secs)?;

    let search = Arc::new(GoogleSearchClient::new(http.clone(), config.search.clone()));
    info!("Web search client initialized ({})", config.search.base_url);

    let job_listings = config.job_listings.clone().map(|jobs_config| {
        info!("Job listings client initialized ({})", jobs_config.base_url);
        Arc::new(JSearchClient::new(http.clone(), jobs_config)) as Arc<dyn JobListingsProvider>
    });
    if job_listings.is_none() {
        info!("RAPID_API_KEY not set; job search will use web search only");
    }

    let state = AppState {
        search,
        job_listings,
        tool_server_url: config.tool_server_url.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
