//! Error types for windowed list loading.

use thiserror::Error;

/// Errors surfaced by a backing list source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("failed to decode fetched payload: {0}")]
    Parse(String),
}

/// Errors surfaced by windowed load calls.
///
/// Source errors propagate verbatim; the engine performs no retry. A
/// zero-size window is an internal fast path and never surfaces here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("worker task dropped before delivering a result")]
    WorkerLost,
}
