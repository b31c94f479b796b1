//! Progress observations emitted by the crawl loop after every attempt.

const BYTES_PER_MIB: f64 = 1_048_576.0;

/// Byte count in MiB, as shown on progress and completion lines.
pub fn bytes_to_mib(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MIB
}

/// Snapshot after one fetch attempt (successful or terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlProgress {
    /// Index that was just attempted.
    pub index: u64,
    /// Cumulative payload bytes fetched by this crawl.
    pub bytes: u64,
    /// Segments fetched so far in this crawl.
    pub segments: u64,
    /// Segments staged in memory and not yet flushed.
    pub buffered: usize,
    /// False on the observation for the terminal index.
    pub continuing: bool,
}

impl CrawlProgress {
    pub fn mib(&self) -> f64 {
        bytes_to_mib(self.bytes)
    }
}

/// Receives crawl progress. Purely a side channel; never affects control flow.
pub trait ProgressObserver {
    fn observe(&mut self, progress: &CrawlProgress);
}

impl<F> ProgressObserver for F
where
    F: FnMut(&CrawlProgress),
{
    fn observe(&mut self, progress: &CrawlProgress) {
        self(progress)
    }
}

/// Observer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn observe(&mut self, _progress: &CrawlProgress) {}
}
