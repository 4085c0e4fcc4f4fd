//! Error taxonomy for note storage and aggregation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NoteError {
    /// Credentials rejected — either on login or by the GitHub API.
    #[error("unauthorized")]
    Unauthorized,

    /// Malformed client input (filename or category).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A remote path does not exist. On the pre-write lookup this is the
    /// "create new file" signal, not a failure.
    #[error("not found: {0}")]
    NotFound(String),

    /// A single file could not be fetched or decoded. Non-fatal: callers
    /// skip the file and continue with the rest.
    #[error("content unavailable: {0}")]
    ContentUnavailable(String),

    /// The remote listing or write failed entirely. Aggregation degrades
    /// to local-only results; writes fall back to the local store.
    #[error("remote unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
