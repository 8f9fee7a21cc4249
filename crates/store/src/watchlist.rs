//! Read-only watchlist access.

use std::sync::Arc;

use async_trait::async_trait;

use crate::entry::WatchlistEntry;
use crate::error::StoreResult;

/// Read-only access to the current watchlist snapshot.
///
/// A snapshot is the full current table content, ordered by entry id,
/// or an error. There is no pagination and no partial result: the
/// dataset is assumed to fit in memory for a full scoring pass.
#[async_trait]
pub trait WatchlistSource: Send + Sync {
    async fn snapshot(&self) -> StoreResult<Vec<WatchlistEntry>>;
}

#[async_trait]
impl<T: WatchlistSource> WatchlistSource for Arc<T> {
    async fn snapshot(&self) -> StoreResult<Vec<WatchlistEntry>> {
        self.as_ref().snapshot().await
    }
}
