//! Audit records and the audit sink seam.
//!
//! Every screening request that reaches the logging stage produces
//! exactly one record, whatever the match outcome. Records are
//! append-only: nothing in this system mutates or deletes them.

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreResult;

/// An audit row before the store assigns its id.
#[derive(Debug, Clone)]
pub struct NewAuditRecord {
    pub client_ip: IpAddr,
    /// The query name as submitted, not the normalized form.
    pub name: String,
    pub threshold: f64,
    pub matched: bool,
    pub recorded_at: DateTime<Utc>,
}

impl NewAuditRecord {
    /// Attach the store-assigned id.
    pub fn into_record(self, id: i64) -> AuditRecord {
        AuditRecord {
            id,
            client_ip: self.client_ip,
            name: self.name,
            threshold: self.threshold,
            matched: self.matched,
            recorded_at: self.recorded_at,
        }
    }
}

/// A persisted audit record.
#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub id: i64,
    pub client_ip: IpAddr,
    pub name: String,
    pub threshold: f64,
    pub matched: bool,
    pub recorded_at: DateTime<Utc>,
}

/// Durable, append-only recording of screening requests.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Persist one record and return it with its assigned id. The
    /// write must be committed before this returns; it fails only if
    /// the underlying store is unreachable.
    async fn record(&self, record: NewAuditRecord) -> StoreResult<AuditRecord>;
}

#[async_trait]
impl<T: AuditSink> AuditSink for Arc<T> {
    async fn record(&self, record: NewAuditRecord) -> StoreResult<AuditRecord> {
        self.as_ref().record(record).await
    }
}
