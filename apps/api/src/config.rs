use anyhow::{Context, Result};

const DEFAULT_SEARCH_API_URL: &str = "https://www.googleapis.com/customsearch/v1";
const DEFAULT_JSEARCH_API_URL: &str = "https://jsearch.p.rapidapi.com/search";
const DEFAULT_JSEARCH_API_HOST: &str = "jsearch.p.rapidapi.com";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub search: SearchConfig,
    /// `None` when no RapidAPI key is set; job search then goes straight to web search.
    pub job_listings: Option<JobListingsConfig>,
    pub http_timeout_secs: u64,
    /// Public URL of `/api/webhook`, advertised in the tool definitions.
    pub tool_server_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

/// Credentials and endpoint for the general web-search provider.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub api_key: String,
    pub engine_id: Option<String>,
    pub base_url: String,
}

/// Credentials and endpoint for the JSearch job-listings provider.
#[derive(Debug, Clone)]
pub struct JobListingsConfig {
    pub api_key: String,
    pub api_host: String,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let job_listings = optional_env("RAPID_API_KEY").map(|api_key| JobListingsConfig {
            api_key,
            api_host: optional_env("JSEARCH_API_HOST")
                .unwrap_or_else(|| DEFAULT_JSEARCH_API_HOST.to_string()),
            base_url: optional_env("JSEARCH_API_URL")
                .unwrap_or_else(|| DEFAULT_JSEARCH_API_URL.to_string()),
        });

        Ok(Config {
            search: SearchConfig {
                api_key: require_env("GOOGLE_API_KEY")?,
                engine_id: optional_env("GOOGLE_SEARCH_ENGINE_ID"),
                base_url: optional_env("SEARCH_API_URL")
                    .unwrap_or_else(|| DEFAULT_SEARCH_API_URL.to_string()),
            },
            job_listings,
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            tool_server_url: optional_env("TOOL_SERVER_URL"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an optional variable, treating an empty value the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
