//! Per-run report of source outcomes.

use crate::error::SourceError;

/// Outcome of one source within a run.
#[derive(Debug)]
pub struct SourceReport {
    pub source: String,
    pub outcome: Result<(), SourceError>,
}

/// What a whole run did, source by source, in processing order.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub sources: Vec<SourceReport>,
}

impl PipelineReport {
    pub fn record_success(&mut self, source: &str) {
        self.sources.push(SourceReport {
            source: source.to_string(),
            outcome: Ok(()),
        });
    }

    pub fn record_failure(&mut self, source: &str, error: SourceError) {
        self.sources.push(SourceReport {
            source: source.to_string(),
            outcome: Err(error),
        });
    }

    pub fn delivered(&self) -> usize {
        self.sources.iter().filter(|s| s.outcome.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.sources.len() - self.delivered()
    }

    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }
}
