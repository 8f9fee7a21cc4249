//! Pipeline errors

use thiserror::Error;

/// Failure of a single source during a run. Recorded in the report;
/// never aborts the remaining sources.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The remote list could not be retrieved.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The retrieved payload could not be parsed with the source's
    /// CSV options.
    #[error("csv parse failed: {0}")]
    Parse(String),

    /// The staging artifact could not be written.
    #[error("staging write failed: {0}")]
    Stage(String),

    /// Upload to the transfer destination failed.
    #[error("delivery failed: {0}")]
    Deliver(String),
}

/// Errors that stop a run before any source is processed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid source configuration: {0}")]
    Config(String),

    #[error("transfer configuration error: {0}")]
    TransferConfig(String),

    #[error("transfer connection failed: {0}")]
    Connect(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
