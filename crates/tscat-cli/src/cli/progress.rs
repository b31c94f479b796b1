//! Console progress line for a running crawl.

use std::io::Write;
use tscat_core::crawl::{CrawlProgress, ProgressObserver};

/// Rewrites one stderr line per attempt; ends the line when dropped.
pub struct ConsoleProgress {
    name: String,
    printed: bool,
}

impl ConsoleProgress {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            printed: false,
        }
    }
}

impl ProgressObserver for ConsoleProgress {
    fn observe(&mut self, p: &CrawlProgress) {
        let mut err = std::io::stderr().lock();
        let _ = write!(
            err,
            "\rDownloading '{}' - Segment {}: {:.2} MB",
            self.name,
            p.index,
            p.mib()
        );
        let _ = err.flush();
        self.printed = true;
    }
}

impl Drop for ConsoleProgress {
    fn drop(&mut self) {
        if self.printed {
            eprintln!();
        }
    }
}
