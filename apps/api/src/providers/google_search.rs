//! Web search via the Google Custom Search JSON API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::models::job::NormalizedSearchResult;
use crate::providers::{api_error, ProviderError, SearchPage, SearchProvider};

const SOURCE: &str = "google";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleSearchResponse {
    #[serde(default)]
    items: Vec<GoogleSearchItem>,
    search_information: Option<SearchInformation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleSearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    display_link: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchInformation {
    // Google sends these as strings, but numbers are tolerated too.
    total_results: Option<Value>,
    formatted_search_time: Option<Value>,
}

#[derive(Clone)]
pub struct GoogleSearchClient {
    client: Client,
    config: SearchConfig,
}

impl GoogleSearchClient {
    pub fn new(client: Client, config: SearchConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchClient {
    async fn search(&self, query: &str, num: u32) -> Result<SearchPage, ProviderError> {
        let num = num.to_string();
        let mut params = vec![
            ("key", self.config.api_key.as_str()),
            ("q", query),
            ("num", num.as_str()),
        ];
        if let Some(cx) = self.config.engine_id.as_deref() {
            params.push(("cx", cx));
        }

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Search API returned {}: {}", status, body);
            return Err(api_error(status.as_u16(), body));
        }

        let page = parse_search_response(&body)?;
        debug!(
            "Search for {:?} returned {} results",
            query,
            page.results.len()
        );
        Ok(page)
    }
}

/// Decodes a Custom Search response body into a `SearchPage`.
fn parse_search_response(body: &str) -> Result<SearchPage, ProviderError> {
    let response: GoogleSearchResponse = serde_json::from_str(body)?;

    let (total_results, formatted_search_time) = match response.search_information {
        Some(info) => (
            value_text(info.total_results),
            value_text(info.formatted_search_time),
        ),
        None => ("0".to_string(), "0".to_string()),
    };

    Ok(SearchPage {
        results: response
            .items
            .into_iter()
            .map(|item| NormalizedSearchResult {
                title: item.title,
                link: item.link,
                snippet: item.snippet,
                display_link: item.display_link,
                source: SOURCE.to_string(),
            })
            .collect(),
        total_results,
        formatted_search_time,
    })
}

fn value_text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => "0".to_string(),
    }
}
