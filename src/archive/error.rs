use crate::types::observation::SeriesError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Failed to build archive request for '{0}'")]
    InvalidRequest(String, #[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Archive rejected request {url} with status {status}: {reason}")]
    Api {
        url: String,
        status: reqwest::StatusCode,
        reason: String,
    },

    #[error("Failed to parse archive response from {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected archive response from {url}")]
    Malformed {
        url: String,
        #[source]
        source: MalformedResponse,
    },
}

/// Ways a syntactically valid response can still be unusable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedResponse {
    #[error("response has no 'daily' block")]
    MissingDaily,

    #[error("'{field}' has {found} values, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("'{0}' is not a YYYY-MM-DD date")]
    BadDate(String),

    #[error("series starts at {found}, expected {expected}")]
    WrongStart { expected: NaiveDate, found: NaiveDate },

    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error("temperatures reported in '{found}', requested '{expected}'")]
    UnitMismatch { expected: &'static str, found: String },
}
