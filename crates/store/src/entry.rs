//! Watchlist entries.

use std::collections::BTreeMap;

use screener_matcher::normalize;

/// One row of the current watchlist snapshot.
///
/// Immutable once loaded. `canonical_name` is precomputed when the
/// entry enters the table, not recomputed per query; [`WatchlistEntry::new`]
/// keeps the `canonical_name == normalize(raw_name)` invariant by
/// construction wherever entries are built in-process.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchlistEntry {
    pub id: i32,
    pub raw_name: String,
    pub canonical_name: String,
    /// Remaining columns of the source record. `None` is a NULL column;
    /// the HTTP layer renders those as `"-"`, the domain model does not.
    pub attributes: BTreeMap<String, Option<String>>,
}

impl WatchlistEntry {
    /// Build an entry from a raw name, computing the canonical form.
    pub fn new(
        id: i32,
        raw_name: impl Into<String>,
        attributes: BTreeMap<String, Option<String>>,
    ) -> Self {
        let raw_name = raw_name.into();
        let canonical_name = normalize(&raw_name);
        Self {
            id,
            raw_name,
            canonical_name,
            attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_name_computed_on_construction() {
        let entry = WatchlistEntry::new(7, "O'Brien/Smith-99!!", BTreeMap::new());
        assert_eq!(entry.raw_name, "O'Brien/Smith-99!!");
        assert_eq!(entry.canonical_name, "OBRIEN SMITH 99");
    }
}
