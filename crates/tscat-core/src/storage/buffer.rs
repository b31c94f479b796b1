//! Bounded in-memory staging of fetched segments.

/// Ordered payloads awaiting a flush. Insertion order is fetch order.
#[derive(Debug)]
pub struct SegmentBuffer {
    entries: Vec<Vec<u8>>,
    threshold: usize,
}

impl SegmentBuffer {
    /// A threshold of 0 is treated as 1 (flush after every segment).
    pub fn with_threshold(threshold: usize) -> Self {
        let threshold = threshold.max(1);
        Self {
            entries: Vec::with_capacity(threshold),
            threshold,
        }
    }

    pub fn push(&mut self, payload: Vec<u8>) {
        debug_assert!(
            self.entries.len() < self.threshold,
            "buffer must be flushed before exceeding its threshold"
        );
        self.entries.push(payload);
    }

    /// True once the buffer holds `threshold` entries and must be flushed.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.threshold
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Total payload bytes currently staged.
    pub fn staged_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.len() as u64).sum()
    }

    pub(crate) fn entries(&self) -> &[Vec<u8>] {
        &self.entries
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
