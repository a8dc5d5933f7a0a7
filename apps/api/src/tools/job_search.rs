//! `job-search` tool: job listings first, web search as the fallback.
//!
//! The chain is strictly sequential. The listings provider (when configured)
//! is fully resolved before the web search is tried, and only an error or an
//! empty result moves on to it. Neither failure is fatal: the worst outcome is
//! the "couldn't find any jobs" sentence.

use serde_json::Value;
use tracing::{error, info, warn};

use crate::models::job::{first_present, JobFields, NormalizedJob, NormalizedSearchResult};
use crate::providers::{JobListingsProvider, JobQuery, SearchProvider};
use crate::tools::arguments::ToolArguments;
use crate::tools::formatter::{
    format_jobs, no_jobs_message, LISTINGS_FOLLOW_UP, SEARCH_DERIVED_FOLLOW_UP,
};
use crate::tools::location::infer_region;
use crate::tools::ToolError;

/// Results requested from the web-search fallback.
const FALLBACK_RESULT_COUNT: u32 = 10;

/// Job-board boilerplate trimmed from search-result titles.
const TITLE_NOISE: &[&str] = &[" - job posting |", " | LinkedIn", " | Indeed.com"];

/// Runs a job search and always returns speakable text.
pub async fn handle_job_search(
    arguments: &Value,
    job_listings: Option<&dyn JobListingsProvider>,
    search: &dyn SearchProvider,
) -> String {
    match run_job_search(arguments, job_listings, search).await {
        Ok(text) => text,
        Err(e) => {
            error!("Job search failed: {e}");
            format!("Sorry, I encountered an error while searching for jobs: {e}")
        }
    }
}

async fn run_job_search(
    arguments: &Value,
    job_listings: Option<&dyn JobListingsProvider>,
    search: &dyn SearchProvider,
) -> Result<String, ToolError> {
    let args = ToolArguments::decode(arguments)?;
    let role = args.text("role");
    let area = args.text("area");
    let query = JobQuery {
        region: infer_region(&area),
        role,
        area,
    };
    info!(
        "Job search: role={:?} area={:?} region={}",
        query.role, query.area, query.region
    );

    if let Some(provider) = job_listings {
        match provider.search_jobs(&query).await {
            Ok(jobs) if !jobs.is_empty() => {
                return Ok(format_jobs(
                    &jobs,
                    &query.role,
                    &query.area,
                    LISTINGS_FOLLOW_UP,
                ));
            }
            Ok(_) => info!("Job listings returned no results, falling back to web search"),
            Err(e) => warn!("Job listings provider failed, falling back to web search: {e}"),
        }
    }

    let search_query = format!("{} jobs in {}", query.role, query.area);
    let page = match search.search(&search_query, FALLBACK_RESULT_COUNT).await {
        Ok(page) => page,
        Err(e) => {
            warn!("Fallback web search failed: {e}");
            return Ok(no_jobs_message(&query.role, &query.area));
        }
    };

    if page.results.is_empty() {
        return Ok(no_jobs_message(&query.role, &query.area));
    }

    let jobs: Vec<NormalizedJob> = page
        .results
        .iter()
        .map(|result| job_from_search_result(result, &query.area))
        .collect();

    Ok(format_jobs(
        &jobs,
        &query.role,
        &query.area,
        SEARCH_DERIVED_FOLLOW_UP,
    ))
}

/// Best-effort job record from a generic search hit. The company is whatever
/// follows the last `" - "` in the title, which misreads titles that use the
/// separator for something else.
fn job_from_search_result(result: &NormalizedSearchResult, area: &str) -> NormalizedJob {
    let title = clean_title(&result.title);
    let company = title
        .rsplit_once(" - ")
        .map(|(_, company)| company.trim());

    NormalizedJob::from_fields(JobFields {
        title: Some(title.as_str()),
        company,
        location: Some(area),
        id: first_present(&[Some(result.link.as_str())]),
        ..Default::default()
    })
}

fn clean_title(title: &str) -> String {
    TITLE_NOISE
        .iter()
        .fold(title.to_string(), |acc, noise| acc.replacen(noise, "", 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::fakes::{
        job, search_page, search_result, FakeJobListings, FakeSearch, Reply,
    };
    use crate::providers::SearchPage;
    use serde_json::json;

    fn args() -> Value {
        json!({ "role": "Rust Developer", "area": "Bangalore" })
    }

    fn numbered_lines(text: &str) -> usize {
        text.lines()
            .filter(|l| l.starts_with(|c: char| c.is_ascii_digit()))
            .count()
    }

    #[tokio::test]
    async fn test_listings_success_skips_fallback() {
        let listings = FakeJobListings::new(Reply::Ok(vec![
            job("Rust Engineer", "Acme", "Bengaluru", false),
            job("Systems Dev", "Initech", "Bengaluru", true),
        ]));
        let search = FakeSearch::new(Reply::Ok(SearchPage::default()));

        let text = handle_job_search(&args(), Some(&listings), &search).await;

        assert!(text.starts_with("I found 2 jobs for Rust Developer in Bangalore:"));
        assert_eq!(numbered_lines(&text), 2);
        assert!(text.contains("2. Initech; Systems Dev; Bengaluru (Remote)"));
        assert!(text.ends_with(LISTINGS_FOLLOW_UP));
        assert_eq!(search.calls(), 0);

        let sent = listings.last_query().unwrap();
        assert_eq!(sent.region, "IN");
        assert_eq!(sent.role, "Rust Developer");
    }

    #[tokio::test]
    async fn test_empty_listings_fall_back_to_search() {
        let listings = FakeJobListings::new(Reply::Ok(vec![]));
        let search = FakeSearch::new(Reply::Ok(search_page(vec![
            search_result("Rust Developer - Acme Corp", "https://jobs.example/1"),
            search_result("Senior Rust Developer - Globex | LinkedIn", "https://linkedin.example/2"),
            search_result("Rust jobs in Bangalore", "https://board.example/3"),
        ])));

        let text = handle_job_search(&args(), Some(&listings), &search).await;

        assert_eq!(listings.calls(), 1);
        assert_eq!(
            search.last_request(),
            Some(("Rust Developer jobs in Bangalore".to_string(), 10))
        );
        assert!(text.starts_with("I found 3 jobs for Rust Developer in Bangalore:"));
        assert_eq!(numbered_lines(&text), 3);
        assert!(text.contains("1. Acme Corp; Rust Developer - Acme Corp; Bangalore"));
        assert!(text.contains("2. Globex; Senior Rust Developer - Globex; Bangalore"));
        assert!(text.contains("3. Unknown Company; Rust jobs in Bangalore; Bangalore"));
        assert!(text.ends_with(SEARCH_DERIVED_FOLLOW_UP));
    }

    #[tokio::test]
    async fn test_listings_error_falls_back_to_search() {
        let listings = FakeJobListings::new(Reply::Fail("rate limited"));
        let search = FakeSearch::new(Reply::Ok(search_page(vec![search_result(
            "Dev - Acme",
            "https://jobs.example/1",
        )])));

        let text = handle_job_search(&args(), Some(&listings), &search).await;

        assert!(text.starts_with("I found 1 jobs for Rust Developer in Bangalore:"));
        assert_eq!(search.calls(), 1);
    }

    #[tokio::test]
    async fn test_without_listings_provider_goes_straight_to_search() {
        let search = FakeSearch::new(Reply::Ok(search_page(vec![search_result(
            "Dev - Acme",
            "https://jobs.example/1",
        )])));

        let text = handle_job_search(&args(), None, &search).await;

        assert_eq!(search.calls(), 1);
        assert!(text.contains("1. Acme; Dev - Acme; Bangalore"));
    }

    #[tokio::test]
    async fn test_both_sources_failing_is_no_jobs_text() {
        let listings = FakeJobListings::new(Reply::Fail("down"));
        let search = FakeSearch::new(Reply::Fail("also down"));

        let text = handle_job_search(&args(), Some(&listings), &search).await;

        assert_eq!(
            text,
            "I couldn't find any Rust Developer jobs in Bangalore. Please try a different search or location."
        );
    }

    #[tokio::test]
    async fn test_both_sources_empty_is_no_jobs_text() {
        let listings = FakeJobListings::new(Reply::Ok(vec![]));
        let search = FakeSearch::new(Reply::Ok(search_page(vec![])));

        let text = handle_job_search(&args(), Some(&listings), &search).await;

        assert_eq!(text, no_jobs_message("Rust Developer", "Bangalore"));
    }

    #[tokio::test]
    async fn test_twelve_listings_show_five() {
        let jobs = (1..=12)
            .map(|i| job(&format!("Role {i}"), "Acme", "Austin", false))
            .collect();
        let listings = FakeJobListings::new(Reply::Ok(jobs));
        let search = FakeSearch::new(Reply::Ok(SearchPage::default()));

        let text = handle_job_search(&json!({"role": "dev", "area": "Austin"}), Some(&listings), &search)
            .await;

        assert!(text.starts_with("I found 12 jobs for dev in Austin:"));
        assert_eq!(numbered_lines(&text), 5);
    }

    #[tokio::test]
    async fn test_missing_arguments_default_to_empty() {
        let search = FakeSearch::new(Reply::Ok(search_page(vec![])));

        let text = handle_job_search(&Value::Null, None, &search).await;

        assert_eq!(search.last_request(), Some((" jobs in ".to_string(), 10)));
        assert_eq!(text, no_jobs_message("", ""));
    }

    #[tokio::test]
    async fn test_unparseable_arguments_become_error_text() {
        let search = FakeSearch::new(Reply::Ok(SearchPage::default()));

        let text = handle_job_search(&json!("{role:"), None, &search).await;

        assert!(text.starts_with("Sorry, I encountered an error while searching for jobs:"));
        assert_eq!(search.calls(), 0);
    }

    #[test]
    fn test_job_from_search_result_without_separator() {
        let job = job_from_search_result(&search_result("Hiring now", "https://x.example/1"), "");
        assert_eq!(job.company, "Unknown Company");
        assert_eq!(job.locations, vec!["Unknown Location".to_string()]);
        assert_eq!(job.id, "https://x.example/1");
        assert!(!job.is_remote);
    }

    #[test]
    fn test_clean_title_strips_board_suffixes() {
        assert_eq!(clean_title("Dev - Acme | Indeed.com"), "Dev - Acme");
        assert_eq!(clean_title("Dev - job posting | Acme"), "Dev Acme");
    }
}
