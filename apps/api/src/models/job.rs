use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const UNKNOWN_LOCATION: &str = "Unknown Location";
pub const NOT_SPECIFIED: &str = "Not specified";

/// A job posting in the one shape every source is cleaned into.
///
/// Invariants: `title` and `company` are non-empty and `locations` has at least
/// one entry. The constructors below are the only places that build it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedJob {
    pub title: String,
    pub company: String,
    pub locations: Vec<String>,
    pub levels: Vec<String>,
    pub categories: Vec<String>,
    /// RFC 3339 timestamp.
    pub publication_date: String,
    pub id: String,
    pub is_remote: bool,
}

/// One general web-search hit after cleaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub display_link: String,
    pub source: String,
}

/// Loose field values as the sources hand them over. Blank strings count as missing.
#[derive(Debug, Default)]
pub struct JobFields<'a> {
    pub title: Option<&'a str>,
    pub company: Option<&'a str>,
    pub location: Option<&'a str>,
    pub level: Option<&'a str>,
    pub category: Option<&'a str>,
    pub publication_date: Option<&'a str>,
    pub id: Option<&'a str>,
    pub is_remote: bool,
}

impl NormalizedJob {
    /// Builds a job from whatever the source supplied, filling every gap with
    /// the shared placeholders.
    pub fn from_fields(fields: JobFields<'_>) -> Self {
        NormalizedJob {
            title: present(fields.title).unwrap_or("Unknown Position").to_string(),
            company: present(fields.company).unwrap_or(UNKNOWN_COMPANY).to_string(),
            locations: vec![present(fields.location)
                .unwrap_or(UNKNOWN_LOCATION)
                .to_string()],
            levels: vec![present(fields.level).unwrap_or(NOT_SPECIFIED).to_string()],
            categories: vec![present(fields.category).unwrap_or(NOT_SPECIFIED).to_string()],
            publication_date: present(fields.publication_date)
                .map(str::to_string)
                .unwrap_or_else(|| Utc::now().to_rfc3339()),
            id: present(fields.id)
                .map(str::to_string)
                .unwrap_or_else(|| format!("job-{}", Uuid::new_v4())),
            is_remote: fields.is_remote,
        }
    }

    /// The location spoken to the user: the first listed one.
    pub fn primary_location(&self) -> &str {
        self.locations
            .first()
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LOCATION)
    }
}

/// Returns the first non-blank candidate, trimmed.
pub fn first_present<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates.iter().copied().find_map(present)
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
