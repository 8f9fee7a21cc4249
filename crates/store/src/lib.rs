//! Storage layer: the watchlist snapshot and the audit log.
//!
//! Two narrow seams face the screening engine:
//!
//! - [`WatchlistSource`] - full-snapshot, read-only access to the
//!   current watchlist table
//! - [`AuditSink`] - durable append of one audit record per screening
//!   request
//!
//! [`PgWatchlist`] and [`PgAuditLog`] implement them against Postgres;
//! [`MemoryWatchlist`] and [`MemoryAuditLog`] are in-memory twins for
//! tests and local runs.

pub mod audit;
pub mod config;
pub mod entry;
pub mod error;
pub mod memory;
pub mod pg;
pub mod watchlist;

pub use audit::{AuditRecord, AuditSink, NewAuditRecord};
pub use config::DbConfig;
pub use entry::WatchlistEntry;
pub use error::{StoreError, StoreResult};
pub use memory::{MemoryAuditLog, MemoryWatchlist, UnavailableWatchlist};
pub use pg::{PgAuditLog, PgWatchlist};
pub use watchlist::WatchlistSource;
