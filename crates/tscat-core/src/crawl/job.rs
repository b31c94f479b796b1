//! One crawl bound to a destination: source selection, writer setup, logging.

use std::path::PathBuf;
use std::time::Instant;

use super::{run_crawl, CrawlError, CrawlOptions, CrawlReport, ProgressObserver};
use crate::source::{AnySource, SourceKind, SourceSettings};
use crate::storage::SegmentWriter;
use crate::template::SegmentTemplate;

/// Everything needed to crawl one template into one destination file.
#[derive(Debug, Clone)]
pub struct CrawlJob {
    pub template: SegmentTemplate,
    pub destination: PathBuf,
    /// Append to existing destination content instead of truncating it.
    pub resume: bool,
    pub options: CrawlOptions,
    pub source_kind: SourceKind,
    pub settings: SourceSettings,
}

impl CrawlJob {
    /// Builds the configured source, opens the destination and runs the crawl.
    /// Blocking; call from `spawn_blocking` when used from async code.
    pub fn run<O>(&self, observer: &mut O) -> Result<CrawlReport, CrawlError>
    where
        O: ProgressObserver + ?Sized,
    {
        let mut source = AnySource::for_template(&self.template, self.source_kind, &self.settings)?;
        let mut writer =
            SegmentWriter::open(&self.destination, self.resume).map_err(|source| {
                CrawlError::Storage {
                    path: self.destination.clone(),
                    source,
                }
            })?;

        tracing::info!(
            template = %self.template,
            destination = %self.destination.display(),
            source = %source.kind(),
            start = self.options.start,
            digits = self.options.digits,
            resume = self.resume,
            "crawl started"
        );
        let started = Instant::now();
        let result = run_crawl(&mut source, &self.template, &self.options, &mut writer, observer);
        let elapsed_secs = started.elapsed().as_secs_f64();

        match &result {
            Ok(report) => tracing::info!(
                destination = %self.destination.display(),
                bytes = report.bytes,
                segments = report.segments,
                last_index = report.last_index,
                elapsed_secs,
                "crawl finished"
            ),
            Err(e) => tracing::warn!(
                destination = %self.destination.display(),
                bytes_on_disk = writer.bytes_written(),
                elapsed_secs,
                error = %e,
                "crawl aborted"
            ),
        }
        result
    }
}
