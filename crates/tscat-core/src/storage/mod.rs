//! Destination file handling.
//!
//! Segments are staged in a bounded [`SegmentBuffer`] and appended to the
//! destination by [`SegmentWriter`] in fetch order. Each flush opens the file
//! in append mode, writes, syncs and closes, so a crash loses at most the
//! unflushed buffer and never reorders bytes already on disk.

mod buffer;
mod writer;

pub use buffer::SegmentBuffer;
pub use writer::SegmentWriter;

use std::path::{Path, PathBuf};

/// Container extension appended to destination names that lack it.
pub const DEFAULT_EXTENSION: &str = "ts";

/// Buffered segments that trigger a flush.
pub const DEFAULT_FLUSH_THRESHOLD: usize = 10;

/// Destination path: `dir/name`, with `.{extension}` appended when `name`
/// does not already contain it.
pub fn destination_path(dir: &Path, name: &str, extension: &str) -> PathBuf {
    let extension = extension.trim_start_matches('.');
    let dotted = format!(".{extension}");
    if extension.is_empty() || name.contains(&dotted) {
        dir.join(name)
    } else {
        dir.join(format!("{name}{dotted}"))
    }
}
