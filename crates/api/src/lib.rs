//! HTTP surface for the screening engine.
//!
//! Thin by design: the routes parse the request, hand it to
//! [`screener_engine::ScreeningService`] and serialize the outcome.
//! The `"-"` placeholder for missing source fields exists only here,
//! at the serialization boundary.

pub mod context;
pub mod routes;

pub use context::AppContext;
