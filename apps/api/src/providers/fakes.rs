//! In-memory providers for handler and router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::job::{JobFields, NormalizedJob, NormalizedSearchResult};
use crate::providers::{JobListingsProvider, JobQuery, ProviderError, SearchPage, SearchProvider};

/// How a fake provider answers every call.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Fail(&'static str),
    Panic,
}

impl<T: Clone> Reply<T> {
    fn answer(&self) -> Result<T, ProviderError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Fail(message) => Err(ProviderError::Api {
                status: 503,
                message: message.to_string(),
            }),
            Reply::Panic => panic!("fake provider exploded"),
        }
    }
}

pub struct FakeSearch {
    reply: Reply<SearchPage>,
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, u32)>>,
}

impl FakeSearch {
    pub fn new(reply: Reply<SearchPage>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<(String, u32)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for FakeSearch {
    async fn search(&self, query: &str, num: u32) -> Result<SearchPage, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some((query.to_string(), num));
        self.reply.answer()
    }
}

pub struct FakeJobListings {
    reply: Reply<Vec<NormalizedJob>>,
    calls: AtomicUsize,
    last_query: Mutex<Option<JobQuery>>,
}

impl FakeJobListings {
    pub fn new(reply: Reply<Vec<NormalizedJob>>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<JobQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobListingsProvider for FakeJobListings {
    async fn search_jobs(&self, query: &JobQuery) -> Result<Vec<NormalizedJob>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        self.reply.answer()
    }
}

pub fn search_result(title: &str, link: &str) -> NormalizedSearchResult {
    NormalizedSearchResult {
        title: title.to_string(),
        link: link.to_string(),
        snippet: format!("Snippet for {title}"),
        display_link: link
            .trim_start_matches("https://")
            .split('/')
            .next()
            .unwrap_or_default()
            .to_string(),
        source: "google".to_string(),
    }
}

pub fn search_page(results: Vec<NormalizedSearchResult>) -> SearchPage {
    SearchPage {
        total_results: results.len().to_string(),
        formatted_search_time: "0.25".to_string(),
        results,
    }
}

pub fn job(title: &str, company: &str, city: &str, is_remote: bool) -> NormalizedJob {
    NormalizedJob::from_fields(JobFields {
        title: Some(title),
        company: Some(company),
        location: Some(city),
        is_remote,
        ..Default::default()
    })
}
