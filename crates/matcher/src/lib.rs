//! Name matching primitives for sanctions screening.
//!
//! Two pure functions make up the whole crate:
//!
//! - [`normalize`] - raw text to canonical comparison form
//! - [`score`] - fuzzy similarity between two canonical names
//!
//! Both are total and deterministic. Canonical names stored in the
//! watchlist and query names at screening time must go through the same
//! [`normalize`], otherwise scores stop being comparable across requests.

pub mod normalize;
pub mod score;

pub use normalize::normalize;
pub use score::score;
