//! In-memory store twins, for tests and local runs.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::audit::{AuditRecord, AuditSink, NewAuditRecord};
use crate::entry::WatchlistEntry;
use crate::error::{StoreError, StoreResult};
use crate::watchlist::WatchlistSource;

/// In-memory watchlist. Entries get sequential ids and their canonical
/// names are computed on insert, so the load-time invariant holds.
#[derive(Debug, Default)]
pub struct MemoryWatchlist {
    entries: Vec<WatchlistEntry>,
}

impl MemoryWatchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name with no extra attributes. Returns the assigned id.
    pub fn insert(&mut self, raw_name: &str) -> i32 {
        self.insert_with_attributes(raw_name, BTreeMap::new())
    }

    /// Add a name with source-record attributes. Returns the assigned id.
    pub fn insert_with_attributes(
        &mut self,
        raw_name: &str,
        attributes: BTreeMap<String, Option<String>>,
    ) -> i32 {
        let id = self.entries.len() as i32 + 1;
        self.entries.push(WatchlistEntry::new(id, raw_name, attributes));
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl WatchlistSource for MemoryWatchlist {
    async fn snapshot(&self) -> StoreResult<Vec<WatchlistEntry>> {
        Ok(self.entries.clone())
    }
}

/// A watchlist whose snapshot always fails, for outage-path tests.
#[derive(Debug, Default)]
pub struct UnavailableWatchlist;

#[async_trait]
impl WatchlistSource for UnavailableWatchlist {
    async fn snapshot(&self) -> StoreResult<Vec<WatchlistEntry>> {
        Err(StoreError::Unavailable("watchlist store is offline".to_string()))
    }
}

/// In-memory audit sink. Assigns sequential ids and keeps every record
/// for inspection.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    records: Mutex<Vec<AuditRecord>>,
    fail_writes: bool,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose writes always fail, for audit-outage tests.
    pub fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_writes: true,
        }
    }

    /// Everything recorded so far, in write order.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditLog {
    async fn record(&self, record: NewAuditRecord) -> StoreResult<AuditRecord> {
        if self.fail_writes {
            return Err(StoreError::WriteFailed("audit store is offline".to_string()));
        }
        let mut records = self.records.lock().unwrap();
        let id = records.len() as i64 + 1;
        let stored = record.into_record(id);
        records.push(stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::net::{IpAddr, Ipv4Addr};

    fn record(name: &str) -> NewAuditRecord {
        NewAuditRecord {
            client_ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
            name: name.to_string(),
            threshold: 0.75,
            matched: false,
            recorded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_memory_watchlist_snapshot() {
        let mut watchlist = MemoryWatchlist::new();
        watchlist.insert("John Smith");
        watchlist.insert("ACME Trading Co.");

        let entries = watchlist.snapshot().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, 1);
        assert_eq!(entries[0].canonical_name, "JOHN SMITH");
        assert_eq!(entries[1].canonical_name, "ACME TRADING CO");
    }

    #[tokio::test]
    async fn test_unavailable_watchlist() {
        let err = UnavailableWatchlist.snapshot().await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_memory_audit_assigns_sequential_ids() {
        let audit = MemoryAuditLog::new();
        let first = audit.record(record("a")).await.unwrap();
        let second = audit.record(record("b")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(audit.records().len(), 2);
    }

    #[tokio::test]
    async fn test_failing_audit_log() {
        let audit = MemoryAuditLog::failing();
        let err = audit.record(record("a")).await.unwrap_err();
        assert!(matches!(err, StoreError::WriteFailed(_)));
        assert!(audit.records().is_empty());
    }
}
