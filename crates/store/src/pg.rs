//! Postgres-backed watchlist and audit storage.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tokio::sync::OnceCell;
use tokio_postgres::{Client, NoTls, Row};

use crate::audit::{AuditRecord, AuditSink, NewAuditRecord};
use crate::config::DbConfig;
use crate::entry::WatchlistEntry;
use crate::error::{StoreError, StoreResult};
use crate::watchlist::WatchlistSource;

/// Connect to Postgres and spawn the connection driver task.
///
/// The returned client is shared across handlers; queries take `&self`
/// so a single connection serves concurrent requests.
pub async fn connect(config: &DbConfig) -> StoreResult<Arc<Client>> {
    let (client, connection) = tokio_postgres::connect(&config.connection_string(), NoTls)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!("postgres connection error: {e}");
        }
    });

    Ok(Arc::new(client))
}

const SNAPSHOT_SQL: &str = "SELECT * FROM consolidated_watchlist ORDER BY id";

/// Full-snapshot reads of the consolidated watchlist table.
///
/// The table is populated by the external ingestion process; this side
/// only ever reads it. `id`, `name` and `cleaned_name` map to the
/// entry fields, every other column lands in `attributes` as a display
/// string (NULL columns as `None`).
pub struct PgWatchlist {
    client: Arc<Client>,
}

impl PgWatchlist {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WatchlistSource for PgWatchlist {
    async fn snapshot(&self) -> StoreResult<Vec<WatchlistEntry>> {
        let rows = self
            .client
            .query(SNAPSHOT_SQL, &[])
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        rows.iter().map(entry_from_row).collect()
    }
}

fn entry_from_row(row: &Row) -> StoreResult<WatchlistEntry> {
    let mut id = None;
    let mut raw_name = String::new();
    let mut canonical_name = String::new();
    let mut attributes = BTreeMap::new();

    for (idx, column) in row.columns().iter().enumerate() {
        match column.name() {
            "id" => {
                id = Some(
                    row.try_get::<_, i32>(idx)
                        .map_err(|e| StoreError::Unavailable(format!("bad id column: {e}")))?,
                );
            }
            "name" => raw_name = column_value(row, idx).unwrap_or_default(),
            "cleaned_name" => canonical_name = column_value(row, idx).unwrap_or_default(),
            other => {
                attributes.insert(other.to_string(), column_value(row, idx));
            }
        }
    }

    let id = id.ok_or_else(|| {
        StoreError::Unavailable("watchlist snapshot row has no id column".to_string())
    })?;

    Ok(WatchlistEntry {
        id,
        raw_name,
        canonical_name,
        attributes,
    })
}

/// Render one column to its display form; NULL becomes `None`.
/// Unrepresentable types degrade to `None` rather than failing the
/// whole snapshot.
fn column_value(row: &Row, idx: usize) -> Option<String> {
    if let Ok(v) = row.try_get::<_, Option<String>>(idx) {
        return v;
    }
    if let Ok(v) = row.try_get::<_, Option<i32>>(idx) {
        return v.map(|n| n.to_string());
    }
    if let Ok(v) = row.try_get::<_, Option<i64>>(idx) {
        return v.map(|n| n.to_string());
    }
    if let Ok(v) = row.try_get::<_, Option<f64>>(idx) {
        return v.map(|n| n.to_string());
    }
    if let Ok(v) = row.try_get::<_, Option<bool>>(idx) {
        return v.map(|b| b.to_string());
    }
    if let Ok(v) = row.try_get::<_, Option<Decimal>>(idx) {
        return v.map(|d| d.to_string());
    }
    if let Ok(v) = row.try_get::<_, Option<NaiveDateTime>>(idx) {
        return v.map(|t| t.to_string());
    }
    None
}

const ENSURE_SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS request_logs (
    id SERIAL PRIMARY KEY,
    client_ip INET,
    name VARCHAR(350),
    threshold NUMERIC,
    response_result BOOLEAN,
    timestamp TIMESTAMP
)";

const INSERT_SQL: &str = "INSERT INTO request_logs \
    (client_ip, name, threshold, response_result, timestamp) \
    VALUES ($1, $2, $3, $4, $5) RETURNING id";

/// Append-only audit log in the `request_logs` table.
///
/// The schema is created lazily on first write if absent; the ensure
/// step is idempotent and runs at most once per process.
pub struct PgAuditLog {
    client: Arc<Client>,
    schema_ready: OnceCell<()>,
}

impl PgAuditLog {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            schema_ready: OnceCell::new(),
        }
    }

    async fn ensure_schema(&self) -> StoreResult<()> {
        self.schema_ready
            .get_or_try_init(|| async {
                self.client
                    .execute(ENSURE_SCHEMA_SQL, &[])
                    .await
                    .map(|_| ())
                    .map_err(|e| StoreError::WriteFailed(format!("audit schema ensure: {e}")))
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl AuditSink for PgAuditLog {
    async fn record(&self, record: NewAuditRecord) -> StoreResult<AuditRecord> {
        self.ensure_schema().await?;

        let threshold = Decimal::from_f64_retain(record.threshold).ok_or_else(|| {
            StoreError::WriteFailed(format!("threshold is not a finite number: {}", record.threshold))
        })?;

        let row = self
            .client
            .query_one(
                INSERT_SQL,
                &[
                    &record.client_ip,
                    &record.name,
                    &threshold,
                    &record.matched,
                    &record.recorded_at.naive_utc(),
                ],
            )
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        let id: i32 = row
            .try_get(0)
            .map_err(|e| StoreError::WriteFailed(format!("audit id not returned: {e}")))?;

        Ok(record.into_record(i64::from(id)))
    }
}
