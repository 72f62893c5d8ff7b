use reqwest::StatusCode;
use thiserror::Error;

/// Per-task failure of a scrape or parse. A batch records these and keeps
/// going; nothing here aborts sibling tasks.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("http {status} for {url}")]
    NetworkFailure { status: StatusCode, url: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("element #{id} or its table body is missing")]
    MissingElement { id: String },

    #[error("row {row} has {found} cells, expected {expected}")]
    SchemaMismatch {
        expected: usize,
        found: usize,
        row: usize,
    },

    #[error("no short code for team {team:?}")]
    LookupMiss { team: String },
}

impl PipelineError {
    pub fn missing_element(id: &str) -> Self {
        PipelineError::MissingElement { id: id.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
