//! Append-only destination writer.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::SegmentBuffer;

/// Appends flushed segments to the destination file.
#[derive(Debug)]
pub struct SegmentWriter {
    path: PathBuf,
    bytes_written: u64,
    flushes: u32,
}

impl SegmentWriter {
    /// Fresh crawl: create the destination, truncating any previous content.
    pub fn create(path: &Path) -> io::Result<Self> {
        File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(Self::at(path))
    }

    /// Resumed crawl: keep existing content (creating an empty file if missing);
    /// new segments are appended after it.
    pub fn resume(path: &Path) -> io::Result<Self> {
        File::options().create(true).append(true).open(path)?;
        Ok(Self::at(path))
    }

    pub fn open(path: &Path, resume: bool) -> io::Result<Self> {
        if resume {
            Self::resume(path)
        } else {
            Self::create(path)
        }
    }

    fn at(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            bytes_written: 0,
            flushes: 0,
        }
    }

    /// Drains `buffer` to the end of the destination in buffered order and
    /// returns the number of bytes written. Empty payloads are skipped. The
    /// buffer is cleared only after every payload was written and synced. A
    /// destination removed since the last flush is created again.
    pub fn flush(&mut self, buffer: &mut SegmentBuffer) -> io::Result<u64> {
        if buffer.is_empty() {
            return Ok(0);
        }
        let file = File::options().create(true).append(true).open(&self.path)?;
        let mut out = BufWriter::new(file);
        let mut written = 0u64;
        for payload in buffer.entries().iter().filter(|p| !p.is_empty()) {
            out.write_all(payload)?;
            written += payload.len() as u64;
        }
        let file = out.into_inner().map_err(|e| e.into_error())?;
        file.sync_data()?;
        drop(file);

        let segments = buffer.len();
        buffer.clear();
        self.bytes_written += written;
        self.flushes += 1;
        tracing::debug!(
            path = %self.path.display(),
            segments,
            bytes = written,
            "flushed segment buffer"
        );
        Ok(written)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes appended by this writer (excludes content preserved on resume).
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn flushes(&self) -> u32 {
        self.flushes
    }
}
