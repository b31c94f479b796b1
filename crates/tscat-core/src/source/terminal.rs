//! Which HTTP statuses mean "no more segments".

/// Class of an HTTP response status for the crawl loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Terminal,
    Failure,
}

/// Configurable list of terminal statuses. Defaults to 404 and 503.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalPolicy {
    statuses: Vec<u32>,
}

impl Default for TerminalPolicy {
    fn default() -> Self {
        Self {
            statuses: vec![404, 503],
        }
    }
}

impl TerminalPolicy {
    pub fn new(statuses: Vec<u32>) -> Self {
        Self { statuses }
    }

    pub fn statuses(&self) -> &[u32] {
        &self.statuses
    }

    /// Terminal statuses win over the success range.
    pub fn classify(&self, code: u32) -> StatusClass {
        if self.statuses.contains(&code) {
            StatusClass::Terminal
        } else if (200..300).contains(&code) {
            StatusClass::Success
        } else {
            StatusClass::Failure
        }
    }
}
