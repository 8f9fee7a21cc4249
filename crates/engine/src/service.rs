//! Screening service - main orchestrator.
//!
//! Coordinates normalization, scoring, threshold filtering and the
//! mandatory audit write.

use screener_matcher::{normalize, score};
use screener_store::{AuditSink, NewAuditRecord, WatchlistSource};

use crate::config::ScreeningConfig;
use crate::error::{ScreeningError, ScreeningResult};
use crate::query::{ScreeningMatch, ScreeningOutcome, ScreeningQuery};

/// Answers screening queries against the current watchlist snapshot.
///
/// Each call performs its own full-snapshot read and scoring pass;
/// there is no cross-request cache, since the query name varies per
/// call. Requests are independent and may run concurrently.
pub struct ScreeningService<W, A> {
    watchlist: W,
    audit: A,
    config: ScreeningConfig,
}

impl<W: WatchlistSource, A: AuditSink> ScreeningService<W, A> {
    pub fn new(watchlist: W, audit: A, config: ScreeningConfig) -> Self {
        Self {
            watchlist,
            audit,
            config,
        }
    }

    pub fn config(&self) -> &ScreeningConfig {
        &self.config
    }

    /// Screen one query.
    ///
    /// A malformed threshold is rejected before scoring and produces no
    /// audit record. Once the query reaches the snapshot stage, exactly
    /// one audit record is written whatever happens next: a snapshot
    /// failure is audited as unmatched before the error surfaces, and a
    /// completed screening whose audit write fails is returned as
    /// [`ScreeningError::AuditWriteFailed`], never as a success.
    pub async fn screen(&self, query: ScreeningQuery) -> ScreeningResult<ScreeningOutcome> {
        if !(0.0..=1.0).contains(&query.threshold) {
            return Err(ScreeningError::InvalidThreshold(query.threshold));
        }

        let canonical = normalize(&query.raw_name);

        let entries = match self.watchlist.snapshot().await {
            Ok(entries) => entries,
            Err(err) => {
                // The outage itself is an auditable request outcome.
                if let Err(audit_err) = self.audit.record(audit_row(&query, false)).await {
                    tracing::warn!("audit write failed during watchlist outage: {audit_err}");
                }
                return Err(ScreeningError::Unavailable(err));
            }
        };

        let mut matches = Vec::new();
        if !canonical.is_empty() {
            for entry in entries {
                if entry.canonical_name.is_empty() {
                    continue;
                }
                let similarity = score(&canonical, &entry.canonical_name, self.config.token_sort);
                if similarity >= query.threshold {
                    matches.push(ScreeningMatch {
                        entry_id: entry.id,
                        score: similarity,
                        raw_name: entry.raw_name,
                        canonical_name: entry.canonical_name,
                        attributes: entry.attributes,
                    });
                }
            }
        }
        matches.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.entry_id.cmp(&b.entry_id))
        });

        let matched = !matches.is_empty();
        self.audit
            .record(audit_row(&query, matched))
            .await
            .map_err(ScreeningError::AuditWriteFailed)?;

        tracing::debug!(
            name = %query.raw_name,
            matched,
            hits = matches.len(),
            "screening completed"
        );

        Ok(ScreeningOutcome { matched, matches })
    }
}

fn audit_row(query: &ScreeningQuery, matched: bool) -> NewAuditRecord {
    NewAuditRecord {
        client_ip: query.client_ip,
        name: query.raw_name.clone(),
        threshold: query.threshold,
        matched,
        recorded_at: query.requested_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screener_store::{MemoryAuditLog, MemoryWatchlist, UnavailableWatchlist};
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;

    const CLIENT: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7));

    fn service(
        names: &[&str],
        config: ScreeningConfig,
    ) -> (
        ScreeningService<MemoryWatchlist, Arc<MemoryAuditLog>>,
        Arc<MemoryAuditLog>,
    ) {
        let mut watchlist = MemoryWatchlist::new();
        for name in names {
            watchlist.insert(name);
        }
        let audit = Arc::new(MemoryAuditLog::new());
        (
            ScreeningService::new(watchlist, audit.clone(), config),
            audit,
        )
    }

    fn query(name: &str, threshold: f64) -> ScreeningQuery {
        ScreeningQuery::new(name, threshold, CLIENT)
    }

    #[tokio::test]
    async fn test_invalid_threshold_rejected_without_audit() {
        let (service, audit) = service(&["John Smith"], ScreeningConfig::default());

        for bad in [-0.1, 1.5, f64::NAN] {
            let err = service.screen(query("John Smith", bad)).await.unwrap_err();
            assert!(matches!(err, ScreeningError::InvalidThreshold(_)));
        }
        assert!(audit.records().is_empty());
    }

    #[tokio::test]
    async fn test_close_name_matches_and_is_audited() {
        let (service, audit) = service(&["John Smith"], ScreeningConfig::default());

        let outcome = service.screen(query("Jon Smith", 0.75)).await.unwrap();

        assert!(outcome.matched);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].entry_id, 1);
        assert_eq!(outcome.matches[0].score, 0.9);

        let records = audit.records();
        assert_eq!(records.len(), 1);
        assert!(records[0].matched);
        assert_eq!(records[0].name, "Jon Smith");
        assert_eq!(records[0].threshold, 0.75);
        assert_eq!(records[0].client_ip, CLIENT);
    }

    #[tokio::test]
    async fn test_distant_name_is_unmatched_but_audited() {
        let (service, audit) = service(&["John Smith", "ACME Trading"], ScreeningConfig::default());

        let outcome = service.screen(query("Zzzzz", 0.75)).await.unwrap();

        assert!(!outcome.matched);
        assert!(outcome.matches.is_empty());

        let records = audit.records();
        assert_eq!(records.len(), 1);
        assert!(!records[0].matched);
    }

    #[tokio::test]
    async fn test_empty_canonical_query_never_matches() {
        let (service, audit) = service(&["John Smith"], ScreeningConfig::default());

        // Normalizes to the empty string; even a zero threshold must
        // not turn it into a match against everything.
        let outcome = service.screen(query("!!! ...", 0.0)).await.unwrap();

        assert!(!outcome.matched);
        assert!(outcome.matches.is_empty());
        assert_eq!(audit.records().len(), 1);
    }

    #[tokio::test]
    async fn test_raising_threshold_never_adds_matches() {
        let names = ["John Smith", "Jon Smyth", "Johan Schmidt", "ACME Trading"];
        let mut previous = usize::MAX;
        for threshold in [0.0, 0.5, 0.8, 0.9, 1.0] {
            let (service, _) = service(&names, ScreeningConfig::default());
            let outcome = service.screen(query("John Smith", threshold)).await.unwrap();
            assert!(
                outcome.matches.len() <= previous,
                "threshold {threshold} returned more matches than a lower one"
            );
            previous = outcome.matches.len();
        }
    }

    #[tokio::test]
    async fn test_matches_sorted_by_score_then_id() {
        // Two identical names tie on score; the lower id wins the tie.
        let (service, _) = service(
            &["Jon Smith", "John Smith", "Jon Smith"],
            ScreeningConfig::default(),
        );

        let outcome = service.screen(query("John Smith", 0.5)).await.unwrap();

        assert_eq!(outcome.matches.len(), 3);
        assert_eq!(outcome.matches[0].entry_id, 2); // exact, score 1.0
        assert_eq!(outcome.matches[1].entry_id, 1);
        assert_eq!(outcome.matches[2].entry_id, 3);
        assert_eq!(outcome.matches[1].score, outcome.matches[2].score);
    }

    #[tokio::test]
    async fn test_token_sort_orientation_is_configurable() {
        let config = ScreeningConfig {
            token_sort: true,
            ..ScreeningConfig::default()
        };
        let (service, _) = service(&["Smith John"], config);
        let outcome = service.screen(query("John Smith", 0.99)).await.unwrap();
        assert!(outcome.matched);
        assert_eq!(outcome.matches[0].score, 1.0);

        let (service, _) = self::service(&["Smith John"], ScreeningConfig::default());
        let outcome = service.screen(query("John Smith", 0.99)).await.unwrap();
        assert!(!outcome.matched);
    }

    #[tokio::test]
    async fn test_snapshot_failure_is_audited_as_unmatched() {
        let audit = Arc::new(MemoryAuditLog::new());
        let service = ScreeningService::new(
            UnavailableWatchlist,
            audit.clone(),
            ScreeningConfig::default(),
        );

        let err = service.screen(query("John Smith", 0.75)).await.unwrap_err();

        assert!(matches!(err, ScreeningError::Unavailable(_)));
        let records = audit.records();
        assert_eq!(records.len(), 1);
        assert!(!records[0].matched);
    }

    #[tokio::test]
    async fn test_audit_failure_is_not_reported_as_success() {
        let mut watchlist = MemoryWatchlist::new();
        watchlist.insert("John Smith");
        let service = ScreeningService::new(
            watchlist,
            MemoryAuditLog::failing(),
            ScreeningConfig::default(),
        );

        let err = service.screen(query("John Smith", 0.75)).await.unwrap_err();
        assert!(matches!(err, ScreeningError::AuditWriteFailed(_)));
    }

    #[tokio::test]
    async fn test_audit_record_carries_request_timestamp() {
        let (service, audit) = service(&["John Smith"], ScreeningConfig::default());

        let requested_at = chrono::DateTime::parse_from_rfc3339("2026-08-29T12:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let query = ScreeningQuery {
            raw_name: "John Smith".to_string(),
            threshold: 0.75,
            client_ip: CLIENT,
            requested_at,
        };

        service.screen(query).await.unwrap();

        let records = audit.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].recorded_at, requested_at);
    }

    #[tokio::test]
    async fn test_exactly_one_audit_record_per_query() {
        let (service, audit) = service(&["John Smith"], ScreeningConfig::default());

        service.screen(query("John Smith", 0.75)).await.unwrap();
        service.screen(query("Nobody Here", 0.75)).await.unwrap();
        service.screen(query("Jon Smith", 0.9)).await.unwrap();

        let records = audit.records();
        assert_eq!(records.len(), 3);
        assert!(records[0].matched);
        assert!(!records[1].matched);
        assert!(records[2].matched);
    }
}
