//! Application context - wires storage and the engine together.

use std::sync::Arc;

use screener_engine::{ScreeningConfig, ScreeningService};
use screener_store::{pg, DbConfig, PgAuditLog, PgWatchlist};

/// Per-process state handed to every request handler. Created once at
/// startup, dropped on shutdown; there is no other process-wide
/// connection state.
pub struct AppContext {
    pub service: ScreeningService<PgWatchlist, PgAuditLog>,
}

impl AppContext {
    /// Connect to the database once and build the screening service
    /// on top of the shared client.
    pub async fn connect(db: &DbConfig, config: ScreeningConfig) -> anyhow::Result<Arc<Self>> {
        let client = pg::connect(db).await?;
        let service = ScreeningService::new(
            PgWatchlist::new(client.clone()),
            PgAuditLog::new(client),
            config,
        );
        Ok(Arc::new(Self { service }))
    }
}
