//! Local-file segment source.

use super::{Fetch, FetchError, SegmentSource};

/// Reads segments from files. A missing or unreadable file ends the stream.
#[derive(Debug, Default)]
pub struct LocalSource;

impl LocalSource {
    pub fn new() -> Self {
        Self
    }
}

impl SegmentSource for LocalSource {
    fn fetch(&mut self, address: &str) -> Result<Fetch, FetchError> {
        match std::fs::read(address) {
            Ok(bytes) => Ok(Fetch::Segment(bytes)),
            Err(e) => {
                tracing::debug!(path = address, error = %e, "local segment unavailable, end of stream");
                Ok(Fetch::Terminal)
            }
        }
    }
}
