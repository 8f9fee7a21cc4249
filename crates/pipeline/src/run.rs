//! The sync run: fetch, stage, deliver, clean up - per source.

use std::path::Path;

use crate::fetch::SourceFetcher;
use crate::report::PipelineReport;
use crate::source::SourceConfig;
use crate::transfer::TransferClient;

/// Process every configured source, in configuration order.
///
/// Continue-on-error: a source that fails at any stage is recorded in
/// the report and the remaining sources still run. The staging
/// artifact is removed unconditionally, delivery failure included.
pub fn run<F, T>(
    sources: &[SourceConfig],
    fetcher: &F,
    transfer: &mut T,
    staging_dir: &Path,
) -> PipelineReport
where
    F: SourceFetcher + ?Sized,
    T: TransferClient + ?Sized,
{
    let mut report = PipelineReport::default();

    for source in sources {
        let remote_name = format!("{}.csv", source.name);
        let artifact = staging_dir.join(&remote_name);

        tracing::info!(source = %source.name, url = %source.url, "retrieving source list");
        let outcome = fetcher.fetch(source, &artifact).and_then(|()| {
            tracing::info!(source = %source.name, "uploading staged artifact");
            transfer.upload(&remote_name, &artifact)
        });

        // Never leak the staging artifact, whatever happened above.
        if artifact.exists() {
            tracing::info!(source = %source.name, "removing staged artifact");
            if let Err(e) = std::fs::remove_file(&artifact) {
                tracing::warn!(source = %source.name, "failed to remove staging artifact: {e}");
            }
        }

        match outcome {
            Ok(()) => {
                tracing::info!(source = %source.name, "source delivered");
                report.record_success(&source.name);
            }
            Err(e) => {
                tracing::warn!(source = %source.name, "source failed: {e}");
                report.record_failure(&source.name, e);
            }
        }
    }

    report
}
