//! Screening request and result types.

use std::collections::BTreeMap;
use std::net::IpAddr;

use chrono::{DateTime, Utc};

/// One screening request. Built per call, never persisted itself; only
/// the derived audit record is.
#[derive(Debug, Clone)]
pub struct ScreeningQuery {
    pub raw_name: String,
    /// Similarity cutoff in [0, 1]; validated by the service.
    pub threshold: f64,
    pub client_ip: IpAddr,
    /// When the request arrived; becomes the audit record's timestamp.
    pub requested_at: DateTime<Utc>,
}

impl ScreeningQuery {
    pub fn new(raw_name: impl Into<String>, threshold: f64, client_ip: IpAddr) -> Self {
        Self {
            raw_name: raw_name.into(),
            threshold,
            client_ip,
            requested_at: Utc::now(),
        }
    }
}

/// A watchlist entry that cleared the threshold.
#[derive(Debug, Clone)]
pub struct ScreeningMatch {
    pub entry_id: i32,
    /// Similarity in [0, 1], rounded to three decimals.
    pub score: f64,
    pub raw_name: String,
    pub canonical_name: String,
    pub attributes: BTreeMap<String, Option<String>>,
}

/// What one screening query produced. Transient; serialized at the
/// HTTP boundary and then discarded.
#[derive(Debug, Clone)]
pub struct ScreeningOutcome {
    /// True when at least one entry cleared the threshold. Always
    /// equal to the flag written to the audit record.
    pub matched: bool,
    /// Sorted by score descending, ties broken by entry id ascending.
    pub matches: Vec<ScreeningMatch>,
}
