//! Optional per-segment retry.
//!
//! A failed fetch is sorted into an [`ErrorKind`]; only transient kinds are
//! retried, with capped exponential backoff. The default policy makes a single
//! attempt, so a failed segment aborts the crawl unless `[retry]` is configured.

mod policy;
mod run;

pub use policy::RetryPolicy;
pub use run::run_with_retry;

use crate::source::FetchError;

/// Why a segment fetch failed, as far as retrying is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Timeout,
    /// 429, or 503 when it is not an end-of-stream status.
    Throttled,
    Connection,
    /// Server error outside the terminal list.
    Http5xx,
    /// Client errors, redirect loops, local curl failures. Never retried.
    Other,
}

impl ErrorKind {
    pub fn is_transient(self) -> bool {
        !matches!(self, ErrorKind::Other)
    }
}

/// Sorts a fetch failure into its retry kind. Terminal statuses never get
/// here; the source turns them into end-of-stream first.
pub fn classify(e: &FetchError) -> ErrorKind {
    match e {
        FetchError::Http(429 | 503) => ErrorKind::Throttled,
        FetchError::Http(500..=599) => ErrorKind::Http5xx,
        FetchError::Http(_) => ErrorKind::Other,
        FetchError::Curl(ce) if ce.is_operation_timedout() => ErrorKind::Timeout,
        FetchError::Curl(ce)
            if ce.is_couldnt_connect()
                || ce.is_couldnt_resolve_host()
                || ce.is_recv_error()
                || ce.is_send_error()
                || ce.is_got_nothing()
                || ce.is_partial_file() =>
        {
            ErrorKind::Connection
        }
        FetchError::Curl(_) => ErrorKind::Other,
    }
}
