use super::{classify, RetryPolicy};
use crate::source::FetchError;

/// Calls `fetch` until it succeeds or `policy` gives up, sleeping between
/// attempts. Returns the last error.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, mut fetch: F) -> Result<T, FetchError>
where
    F: FnMut() -> Result<T, FetchError>,
{
    let mut attempt = 1u32;
    loop {
        let err = match fetch() {
            Ok(v) => return Ok(v),
            Err(e) => e,
        };
        let kind = classify(&err);
        let Some(wait) = policy.decide(attempt, kind) else {
            return Err(err);
        };
        tracing::debug!(
            attempt,
            ?kind,
            wait_ms = wait.as_millis() as u64,
            error = %err,
            "segment fetch failed, retrying"
        );
        std::thread::sleep(wait);
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn quick(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    #[test]
    fn succeeds_after_transient_failures() {
        let mut calls = 0;
        let out = run_with_retry(&quick(3), || {
            calls += 1;
            if calls < 3 {
                Err(FetchError::Http(502))
            } else {
                Ok(calls)
            }
        });
        assert_eq!(out.unwrap(), 3);
    }

    #[test]
    fn returns_last_error_when_attempts_run_out() {
        let mut calls = 0;
        let out: Result<(), _> = run_with_retry(&quick(2), || {
            calls += 1;
            Err(FetchError::Http(500))
        });
        assert!(matches!(out, Err(FetchError::Http(500))));
        assert_eq!(calls, 2);
    }

    #[test]
    fn client_error_is_not_retried() {
        let mut calls = 0;
        let out: Result<(), _> = run_with_retry(&quick(5), || {
            calls += 1;
            Err(FetchError::Http(403))
        });
        assert!(out.is_err());
        assert_eq!(calls, 1);
    }
}
