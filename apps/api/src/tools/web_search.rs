//! `web-search` tool: one call to the search provider, summarised as text.

use serde_json::Value;
use tracing::{error, info, warn};

use crate::providers::SearchProvider;
use crate::tools::arguments::ToolArguments;
use crate::tools::formatter::format_search_page;
use crate::tools::ToolError;

const RESULT_COUNT: u32 = 5;

pub const MISSING_QUERY: &str = "Please provide a valid search query.";

/// Runs a web search and always returns speakable text.
pub async fn handle_web_search(arguments: &Value, search: &dyn SearchProvider) -> String {
    match run_web_search(arguments, search).await {
        Ok(text) => text,
        Err(e) => {
            error!("Web search failed: {e}");
            format!("Sorry, I encountered an error while searching: {e}")
        }
    }
}

async fn run_web_search(arguments: &Value, search: &dyn SearchProvider) -> Result<String, ToolError> {
    let args = ToolArguments::decode(arguments)?;

    let Some(query) = args
        .string(&["searchQuery", "search_query"])
        .filter(|q| !q.is_empty())
    else {
        return Ok(MISSING_QUERY.to_string());
    };

    info!("Web search: {:?}", query);

    let page = match search.search(query, RESULT_COUNT).await {
        Ok(page) => page,
        Err(e) => {
            warn!("Web search provider failed: {e}");
            return Ok(format!("Search failed: {e}"));
        }
    };

    if page.results.is_empty() {
        return Ok(format!("No results found for \"{query}\"."));
    }

    Ok(format_search_page(&page, query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::fakes::{search_page, search_result, FakeSearch, Reply};
    use crate::providers::SearchPage;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_query_skips_provider() {
        let search = FakeSearch::new(Reply::Ok(SearchPage::default()));

        assert_eq!(handle_web_search(&json!({}), &search).await, MISSING_QUERY);
        assert_eq!(
            handle_web_search(&json!({"searchQuery": 42}), &search).await,
            MISSING_QUERY
        );
        assert_eq!(
            handle_web_search(&json!({"searchQuery": ""}), &search).await,
            MISSING_QUERY
        );
        assert_eq!(search.calls(), 0);
    }

    #[tokio::test]
    async fn test_results_are_formatted() {
        let search = FakeSearch::new(Reply::Ok(search_page(vec![
            search_result("Rust", "https://www.rust-lang.org/"),
            search_result("Tokio", "https://tokio.rs/"),
        ])));

        let text = handle_web_search(&json!({"searchQuery": "rust async"}), &search).await;

        assert_eq!(search.last_request(), Some(("rust async".to_string(), 5)));
        assert!(text.starts_with("Found 2 results for \"rust async\" in 0.25 seconds:\n\n1. Rust"));
        assert!(text.contains("\n\n2. Tokio\n   tokio.rs\n   Snippet for Tokio"));
    }

    #[tokio::test]
    async fn test_snake_case_key_is_accepted() {
        let search = FakeSearch::new(Reply::Ok(search_page(vec![search_result(
            "Rust",
            "https://www.rust-lang.org/",
        )])));

        let text = handle_web_search(&json!({"search_query": "rust"}), &search).await;

        assert!(text.starts_with("Found 1 results for \"rust\""));
    }

    #[tokio::test]
    async fn test_no_results() {
        let search = FakeSearch::new(Reply::Ok(search_page(vec![])));

        let text = handle_web_search(&json!({"searchQuery": "zzqx"}), &search).await;

        assert_eq!(text, "No results found for \"zzqx\".");
    }

    #[tokio::test]
    async fn test_provider_failure_is_reported_as_text() {
        let search = FakeSearch::new(Reply::Fail("quota exceeded"));

        let text = handle_web_search(&json!({"searchQuery": "rust"}), &search).await;

        assert_eq!(text, "Search failed: API error (status 503): quota exceeded");
    }

    #[tokio::test]
    async fn test_bad_arguments_become_apology() {
        let search = FakeSearch::new(Reply::Ok(SearchPage::default()));

        let text = handle_web_search(&json!(true), &search).await;

        assert_eq!(
            text,
            "Sorry, I encountered an error while searching: invalid tool arguments: expected an object, got a boolean"
        );
    }
}
