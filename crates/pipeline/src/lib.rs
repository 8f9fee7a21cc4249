//! Watchlist source sync pipeline.
//!
//! A scheduled job, not a service: each run walks the configured
//! sources in order, fetches each remote list, stages it locally as a
//! normalized CSV, delivers it to the transfer destination over an
//! authenticated encrypted channel and removes the staging artifact.
//!
//! Failures are isolated per source (continue-on-error): one broken
//! source is recorded in the [`report::PipelineReport`] and the run
//! moves on. Staging artifacts are removed unconditionally, delivery
//! failure included - the contract is "never leak local temp files",
//! not "never lose data"; the next scheduled run re-fetches.

pub mod error;
pub mod fetch;
pub mod report;
pub mod run;
pub mod source;
pub mod transfer;

pub use error::{PipelineError, SourceError};
pub use fetch::{HttpCsvFetcher, SourceFetcher};
pub use report::{PipelineReport, SourceReport};
pub use run::run;
pub use source::{load_sources, SourceConfig};
pub use transfer::{FtpsTransfer, TransferClient, TransferConfig};
