//! Retry with exponential backoff for retrieval requests

use std::time::Duration;

use crate::http::{HttpError, http_config};

/// Exponential backoff: 2^attempt seconds (2s, 4s, 8s, ...)
pub const fn backoff_duration(attempt: u32) -> Duration {
    Duration::from_secs(2u64.pow(attempt))
}

/// Retry a fallible request with exponential backoff.
///
/// Retries retryable errors up to `max_retries` (from the global
/// [`HttpConfig`](crate::HttpConfig)). Returns the first success, or the
/// final error on exhaustion / non-retryable error.
pub fn retry_with_backoff<T>(
    label: &str,
    mut attempt_fn: impl FnMut() -> Result<T, HttpError>,
) -> Result<T, HttpError> {
    retry_with_policy(label, http_config().max_retries, backoff_duration, &mut attempt_fn)
}

fn retry_with_policy<T>(
    label: &str,
    max_retries: u32,
    backoff: impl Fn(u32) -> Duration,
    attempt_fn: &mut impl FnMut() -> Result<T, HttpError>,
) -> Result<T, HttpError> {
    let mut attempt = 0u32;
    loop {
        match attempt_fn() {
            Ok(v) => return Ok(v),
            Err(e) if attempt < max_retries && e.is_retryable() => {
                attempt += 1;
                log::warn!("{label}: attempt {attempt}/{max_retries} failed: {e}, retrying...");
                std::thread::sleep(backoff(attempt));
            }
            Err(e) => {
                log::error!("{label}: failed permanently: {e}");
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> HttpError {
        HttpError::Http {
            status: Some(code),
            message: "test".to_string(),
        }
    }

    #[test]
    fn backoff_exponential() {
        assert_eq!(backoff_duration(1), Duration::from_secs(2));
        assert_eq!(backoff_duration(2), Duration::from_secs(4));
        assert_eq!(backoff_duration(3), Duration::from_secs(8));
    }

    #[test]
    fn retries_until_success() {
        let mut calls = 0;
        let result = retry_with_policy("test", 3, |_| Duration::ZERO, &mut || {
            calls += 1;
            if calls < 3 { Err(status(503)) } else { Ok(calls) }
        });
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn gives_up_on_client_error() {
        let mut calls = 0;
        let result: Result<(), _> = retry_with_policy("test", 3, |_| Duration::ZERO, &mut || {
            calls += 1;
            Err(status(400))
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn gives_up_after_max_retries() {
        let mut calls = 0;
        let result: Result<(), _> = retry_with_policy("test", 2, |_| Duration::ZERO, &mut || {
            calls += 1;
            Err(status(500))
        });
        assert!(result.is_err());
        assert_eq!(calls, 3);
    }
}
