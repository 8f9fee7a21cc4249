//! Screening errors

use screener_store::StoreError;
use thiserror::Error;

/// Errors surfaced to screening callers
#[derive(Debug, Error)]
pub enum ScreeningError {
    /// Malformed request, rejected before any scoring or logging.
    #[error("threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    /// The watchlist snapshot could not be read. The attempt is still
    /// audited (as unmatched) before this is returned.
    #[error("screening unavailable: {0}")]
    Unavailable(#[source] StoreError),

    /// The screening ran but its mandatory audit record did not
    /// persist. Never reported to callers as a success.
    #[error("audit write failed: {0}")]
    AuditWriteFailed(#[source] StoreError),
}

/// Result type for screening operations
pub type ScreeningResult<T> = Result<T, ScreeningError>;
