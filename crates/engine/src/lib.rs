//! Screening engine.
//!
//! Orchestrates the matcher and the stores to answer one question:
//! does a submitted name resemble anyone on the current watchlist?
//!
//! Flow per query: validate threshold, normalize the name, read the
//! full watchlist snapshot, score every entry, filter by threshold,
//! and write exactly one audit record before the result leaves this
//! crate. The audit write is a compliance requirement, not telemetry:
//! a query whose audit record did not persist is reported as failed.
//!
//! ## Key components
//!
//! - [`config::ScreeningConfig`] - explicit `token_sort` orientation
//! - [`query::ScreeningQuery`] / [`query::ScreeningOutcome`] - request and result
//! - [`service::ScreeningService`] - the orchestrator
//! - [`error::ScreeningError`] - the caller-visible error taxonomy

pub mod config;
pub mod error;
pub mod query;
pub mod service;

pub use config::{ScreeningConfig, DEFAULT_THRESHOLD};
pub use error::{ScreeningError, ScreeningResult};
pub use query::{ScreeningMatch, ScreeningOutcome, ScreeningQuery};
pub use service::ScreeningService;
