//! Result formatters: provider results in, speakable text out.
//!
//! Everything here is pure. The wording is what the voice agent reads aloud,
//! so changes are user-visible.

use crate::models::job::NormalizedJob;
use crate::providers::SearchPage;

/// Jobs beyond this count are still counted but not listed.
pub const MAX_LISTED_JOBS: usize = 5;

pub const LISTINGS_FOLLOW_UP: &str = "Would you like more details about any of these positions?";
pub const SEARCH_DERIVED_FOLLOW_UP: &str =
    "Note: These are general search results. Would you like me to find more specific job listings?";

/// Renders jobs as a count line, a numbered list of at most
/// [`MAX_LISTED_JOBS`] entries and the given follow-up prompt.
pub fn format_jobs(jobs: &[NormalizedJob], role: &str, area: &str, follow_up: &str) -> String {
    let list = jobs
        .iter()
        .take(MAX_LISTED_JOBS)
        .enumerate()
        .map(|(i, job)| format_job_line(i + 1, job))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "I found {} jobs for {} in {}:\n{}\n\n{}",
        jobs.len(),
        role,
        area,
        list,
        follow_up
    )
}

fn format_job_line(index: usize, job: &NormalizedJob) -> String {
    let remote = if job.is_remote { " (Remote)" } else { "" };
    format!(
        "{}. {}; {}; {}{}",
        index,
        job.company,
        job.title,
        job.primary_location(),
        remote
    )
}

/// The narratable outcome when neither job source produced anything.
pub fn no_jobs_message(role: &str, area: &str) -> String {
    format!("I couldn't find any {role} jobs in {area}. Please try a different search or location.")
}

/// Renders a web-search page: summary header, then one three-line block per result.
pub fn format_search_page(page: &SearchPage, query: &str) -> String {
    let results = page
        .results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {}\n   {}\n   {}", i + 1, r.title, r.display_link, r.snippet))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Found {} results for \"{}\" in {} seconds:\n\n{}",
        page.total_results, query, page.formatted_search_time, results
    )
}
