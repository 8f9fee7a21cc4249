//! Storage errors

use thiserror::Error;

/// Errors from the watchlist and audit stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or the snapshot read
    /// failed. No partial snapshot is ever returned.
    #[error("watchlist store unavailable: {0}")]
    Unavailable(String),

    /// The audit record could not be persisted. Callers must not
    /// report the screening as successful when they see this.
    #[error("audit write failed: {0}")]
    WriteFailed(String),

    /// Startup configuration problem (missing or malformed settings).
    #[error("store configuration error: {0}")]
    Config(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
