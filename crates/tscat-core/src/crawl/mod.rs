//! Sequential segment crawl.
//!
//! Walks indices from `start` upward, one fetch at a time, staging payloads in
//! a bounded buffer and appending them to the destination in index order. The
//! crawl ends cleanly when the source reports [`Fetch::Terminal`]; a transient
//! failure aborts it after flushing the segments already fetched.

mod job;
mod progress;

pub use job::CrawlJob;
pub use progress::{bytes_to_mib, CrawlProgress, NoProgress, ProgressObserver};

use std::path::PathBuf;

use crate::source::{Fetch, FetchError, SegmentSource, SourceError};
use crate::storage::{SegmentBuffer, SegmentWriter, DEFAULT_FLUSH_THRESHOLD};
use crate::template::{SegmentTemplate, TemplateError};

/// Per-crawl parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlOptions {
    /// First index to fetch.
    pub start: u64,
    /// Zero-padded width of the index in the template.
    pub digits: usize,
    /// Buffered segments that trigger a flush.
    pub flush_threshold: usize,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            start: 1,
            digits: 1,
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
        }
    }
}

/// Result of a crawl that reached the terminal index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlReport {
    /// Payload bytes fetched and appended by this crawl.
    pub bytes: u64,
    /// Segments fetched (the terminal attempt is not counted).
    pub segments: u64,
    /// Index of the terminal attempt.
    pub last_index: u64,
}

impl CrawlReport {
    pub fn mib(&self) -> f64 {
        bytes_to_mib(self.bytes)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// Fetch of `index` failed. Everything before it is on disk, so a resumed
    /// crawl should start at `index`.
    #[error("segment {index} failed: {source}")]
    Aborted {
        index: u64,
        #[source]
        source: FetchError,
    },
    #[error("destination {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl CrawlError {
    /// Index to resume from, when the crawl was aborted by a fetch failure.
    pub fn failed_index(&self) -> Option<u64> {
        match self {
            CrawlError::Aborted { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Mutable loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CrawlState {
    index: u64,
    bytes: u64,
    segments: u64,
    continuing: bool,
}

impl CrawlState {
    fn new(start: u64) -> Self {
        Self {
            index: start,
            bytes: 0,
            segments: 0,
            continuing: true,
        }
    }
}

/// Runs one crawl to completion, writing through `writer`.
///
/// The index advances after every attempt that did not abort, including the
/// terminal one. On a fetch failure the buffered segments are flushed before
/// returning [`CrawlError::Aborted`] with the failing index; if that flush
/// fails the crawl returns [`CrawlError::Storage`] instead.
pub fn run_crawl<S, O>(
    source: &mut S,
    template: &SegmentTemplate,
    options: &CrawlOptions,
    writer: &mut SegmentWriter,
    observer: &mut O,
) -> Result<CrawlReport, CrawlError>
where
    S: SegmentSource + ?Sized,
    O: ProgressObserver + ?Sized,
{
    let mut state = CrawlState::new(options.start);
    let mut buffer = SegmentBuffer::with_threshold(options.flush_threshold);
    let mut last_index = options.start;

    while state.continuing {
        let address = template.resolve(state.index, options.digits);
        match source.fetch(&address) {
            Ok(Fetch::Segment(payload)) => {
                state.bytes += payload.len() as u64;
                state.segments += 1;
                buffer.push(payload);
            }
            Ok(Fetch::Terminal) => {
                tracing::debug!(index = state.index, "terminal segment");
                state.continuing = false;
            }
            Err(e) => {
                // Without the buffered segments on disk there is no valid resume index.
                if let Err(flush_err) = writer.flush(&mut buffer) {
                    tracing::warn!(
                        path = %writer.path().display(),
                        index = state.index,
                        fetch_error = %e,
                        error = %flush_err,
                        "could not flush fetched segments after abort"
                    );
                    return Err(CrawlError::Storage {
                        path: writer.path().to_path_buf(),
                        source: flush_err,
                    });
                }
                tracing::warn!(index = state.index, url = %address, error = %e, "segment fetch failed, aborting crawl");
                return Err(CrawlError::Aborted {
                    index: state.index,
                    source: e,
                });
            }
        }

        observer.observe(&CrawlProgress {
            index: state.index,
            bytes: state.bytes,
            segments: state.segments,
            buffered: buffer.len(),
            continuing: state.continuing,
        });

        if buffer.is_full() {
            flush(writer, &mut buffer)?;
        }

        last_index = state.index;
        state.index += 1;
    }

    flush(writer, &mut buffer)?;

    Ok(CrawlReport {
        bytes: state.bytes,
        segments: state.segments,
        last_index,
    })
}

fn flush(writer: &mut SegmentWriter, buffer: &mut SegmentBuffer) -> Result<u64, CrawlError> {
    writer.flush(buffer).map_err(|source| CrawlError::Storage {
        path: writer.path().to_path_buf(),
        source,
    })
}
