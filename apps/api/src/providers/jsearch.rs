//! Job listings via the JSearch API on RapidAPI.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::JobListingsConfig;
use crate::models::job::{first_present, JobFields, NormalizedJob};
use crate::providers::{api_error, JobListingsProvider, JobQuery, ProviderError};

#[derive(Debug, Deserialize)]
struct JSearchResponse {
    // `null` and malformed records are tolerated; records are decoded one by one.
    #[serde(default)]
    data: Option<Vec<serde_json::Value>>,
}

/// A JSearch job record. Only the fields we normalise are decoded.
#[derive(Debug, Deserialize)]
struct JSearchJob {
    job_id: Option<String>,
    job_title: Option<String>,
    employer_name: Option<String>,
    job_city: Option<String>,
    job_country: Option<String>,
    job_is_remote: Option<bool>,
    job_employment_type: Option<String>,
    job_posted_at_datetime_utc: Option<String>,
    job_apply_link: Option<String>,
    job_required_experience: Option<RequiredExperience>,
}

#[derive(Debug, Deserialize)]
struct RequiredExperience {
    experience: Option<String>,
}

#[derive(Clone)]
pub struct JSearchClient {
    client: Client,
    config: JobListingsConfig,
}

impl JSearchClient {
    pub fn new(client: Client, config: JobListingsConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl JobListingsProvider for JSearchClient {
    async fn search_jobs(&self, query: &JobQuery) -> Result<Vec<NormalizedJob>, ProviderError> {
        let text = format!("{} in {}", query.role, query.area);

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("query", text.as_str()),
                ("page", "1"),
                ("num_pages", "1"),
                ("country", query.region),
            ])
            .header("x-rapidapi-host", &self.config.api_host)
            .header("x-rapidapi-key", &self.config.api_key)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("JSearch API returned {}: {}", status, body);
            return Err(api_error(status.as_u16(), body));
        }

        let jobs = parse_jobs_response(&body, query)?;
        debug!("JSearch returned {} jobs for {:?}", jobs.len(), text);
        Ok(jobs)
    }
}

/// Decodes a JSearch response body and cleans every well-formed record into a
/// `NormalizedJob`.
fn parse_jobs_response(body: &str, query: &JobQuery) -> Result<Vec<NormalizedJob>, ProviderError> {
    let response: JSearchResponse = serde_json::from_str(body)?;
    Ok(response
        .data
        .unwrap_or_default()
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<JSearchJob>(record) {
            Ok(job) => Some(clean_job(&job, query)),
            Err(e) => {
                warn!("Skipping malformed JSearch record: {e}");
                None
            }
        })
        .collect())
}

fn clean_job(job: &JSearchJob, query: &JobQuery) -> NormalizedJob {
    NormalizedJob::from_fields(JobFields {
        title: first_present(&[job.job_title.as_deref(), Some(query.role.as_str())]),
        company: job.employer_name.as_deref(),
        location: first_present(&[
            job.job_city.as_deref(),
            job.job_country.as_deref(),
            Some(query.area.as_str()),
        ]),
        level: job
            .job_required_experience
            .as_ref()
            .and_then(|e| e.experience.as_deref()),
        category: job.job_employment_type.as_deref(),
        publication_date: job.job_posted_at_datetime_utc.as_deref(),
        id: first_present(&[job.job_id.as_deref(), job.job_apply_link.as_deref()]),
        is_remote: job.job_is_remote.unwrap_or(false),
    })
}
