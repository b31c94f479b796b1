//! Manifest runner: one crawl per `(url, filename)` entry of a JSON array.
//!
//! A manifest that cannot be read or parsed halts the run before any crawl
//! starts. Once crawling, a failed entry only ends that entry; the runner
//! moves on and reports per-entry outcomes.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::abort::{self, AbortAction};
use crate::crawl::{CrawlError, CrawlJob, CrawlOptions, CrawlReport, ProgressObserver};
use crate::source::{SourceKind, SourceSettings};
use crate::storage::destination_path;
use crate::template::SegmentTemplate;

/// One manifest entry. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Segment template (URL or path) with an `[i]` placeholder.
    pub url: String,
    /// Destination file name inside the output directory.
    pub filename: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("could not open manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse manifest {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn parse_manifest(json: &str) -> Result<Vec<ManifestEntry>, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn load_manifest(path: &Path) -> Result<Vec<ManifestEntry>, ManifestError> {
    let data = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(&data).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Outcome of one manifest entry.
#[derive(Debug)]
pub struct EntryOutcome {
    pub entry: ManifestEntry,
    pub destination: PathBuf,
    pub result: Result<CrawlReport, CrawlError>,
}

/// Shared settings applied to every entry of a manifest.
#[derive(Debug, Clone)]
pub struct ManifestRunner {
    pub dir: PathBuf,
    pub extension: String,
    pub options: CrawlOptions,
    pub source_kind: SourceKind,
    pub settings: SourceSettings,
}

impl ManifestRunner {
    pub fn destination_for(&self, entry: &ManifestEntry) -> PathBuf {
        destination_path(&self.dir, &entry.filename, &self.extension)
    }

    /// Fresh (non-resumed) crawl job for `entry`.
    pub fn job_for(&self, entry: &ManifestEntry) -> Result<CrawlJob, CrawlError> {
        Ok(CrawlJob {
            template: SegmentTemplate::parse(&entry.url)?,
            destination: self.destination_for(entry),
            resume: false,
            options: self.options,
            source_kind: self.source_kind,
            settings: self.settings.clone(),
        })
    }

    /// Crawls every entry in order. `observer_for` builds a progress observer
    /// per entry; `on_abort` decides what to do with the partial file of an
    /// entry whose crawl was aborted by a fetch failure.
    pub fn run<O, F, D>(
        &self,
        entries: &[ManifestEntry],
        mut observer_for: F,
        mut on_abort: D,
    ) -> Vec<EntryOutcome>
    where
        O: ProgressObserver,
        F: FnMut(&ManifestEntry) -> O,
        D: FnMut(&ManifestEntry, &Path, &CrawlError) -> AbortAction,
    {
        tracing::info!(entries = entries.len(), dir = %self.dir.display(), "manifest run started");
        let mut outcomes = Vec::with_capacity(entries.len());
        for entry in entries {
            let destination = self.destination_for(entry);
            let result = self.job_for(entry).and_then(|job| {
                let mut observer = observer_for(entry);
                job.run(&mut observer)
            });
            if let Err(e) = &result {
                if e.failed_index().is_some() {
                    let action = on_abort(entry, &destination, e);
                    if let Err(io_err) = abort::apply(&destination, action) {
                        tracing::warn!(path = %destination.display(), error = %io_err, "could not remove partial file");
                    }
                } else {
                    tracing::warn!(url = %entry.url, error = %e, "manifest entry failed");
                }
            }
            outcomes.push(EntryOutcome {
                entry: entry.clone(),
                destination,
                result,
            });
        }
        outcomes
    }
}
