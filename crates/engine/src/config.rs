//! Screening configuration.

/// Threshold applied when a query does not carry its own.
pub const DEFAULT_THRESHOLD: f64 = 0.75;

/// Behavior knobs for the screening service.
///
/// `token_sort` is deliberately explicit configuration rather than a
/// hardcoded constant: deployments of this style of screener have
/// shipped with both orientations as the default, so the choice is
/// surfaced to the operator.
#[derive(Debug, Clone)]
pub struct ScreeningConfig {
    /// Sort name tokens alphabetically before scoring. Neutralizes
    /// surname/given-name order swaps at the cost of treating any
    /// reordering as equivalent.
    pub token_sort: bool,
    /// Threshold used when a query omits one.
    pub default_threshold: f64,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            token_sort: false,
            default_threshold: DEFAULT_THRESHOLD,
        }
    }
}
