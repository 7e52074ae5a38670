use std::time::Duration;

use thiserror::Error;

/// Failures a search session can surface to its UI.
///
/// These never end up merged into `results`; the session keeps them in a
/// separate slot until the next completed search or an empty query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("search backend unavailable: {0}")]
    Transient(String),
}

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse corpus: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate record id in corpus: {0}")]
    DuplicateId(String),
}
