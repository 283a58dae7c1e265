//! Bounded polling for reads that depend on recently written remote state.
//!
//! # Responsibilities
//! - Validate the caller's `wait_for` before anything is fetched
//! - Re-run a read on a fixed one-second interval until it succeeds or the
//!   wait deadline would be overrun
//! - Hand back the last real failure on expiry, not a synthetic timeout
//! - Stop immediately when the caller cancels
//!
//! # Timing
//! ```text
//! no wait_for:   attempt → done
//! wait_for = W:  deadline = start + W
//!                attempt → ok? done
//!                        → now + 1s > deadline? return last error
//!                        → sleep 1s → attempt → ...
//! ```
//!
//! # Design Decisions
//! - Not-found and remote errors are retried alike (see `Error::is_retryable`)
//! - No attempt cap; only the deadline bounds the loop
//! - Attempts are strictly sequential; nothing is spawned

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result, ValidationError};
use crate::observability::metrics;
use crate::resilience::duration::parse_duration;

/// Delay between attempts.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Attribute name reported on `wait_for` validation failures.
pub const WAIT_FOR_PATH: &str = "wait_for";

/// A validated wait window, strictly longer than [`POLL_INTERVAL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitSpec(Duration);

impl WaitSpec {
    pub fn new(duration: Duration) -> std::result::Result<Self, ValidationError> {
        if duration <= POLL_INTERVAL {
            return Err(ValidationError::new(
                WAIT_FOR_PATH,
                "wait_for must be greater than 1 second",
            ));
        }
        Ok(Self(duration))
    }

    pub fn duration(&self) -> Duration {
        self.0
    }
}

/// Parse a `wait_for` literal into a [`WaitSpec`].
pub fn parse_wait_spec(raw: &str) -> std::result::Result<WaitSpec, ValidationError> {
    let parsed = parse_duration(raw).map_err(|e| {
        ValidationError::new(WAIT_FOR_PATH, "failed to parse wait_for").with_detail(e)
    })?;

    match parsed.positive() {
        Some(duration) => WaitSpec::new(duration),
        None => Err(ValidationError::new(
            WAIT_FOR_PATH,
            "wait_for must be greater than 1 second",
        )),
    }
}

/// Result of a single attempt.
enum PollOutcome<T> {
    Success(T),
    Failure(Error),
}

impl<T> PollOutcome<T> {
    fn label(&self) -> &'static str {
        match self {
            PollOutcome::Success(_) => "success",
            PollOutcome::Failure(Error::NotFound { .. }) => "not_found",
            PollOutcome::Failure(Error::Remote(_)) => "remote_error",
            PollOutcome::Failure(Error::Cancelled) => "cancelled",
            PollOutcome::Failure(Error::Validation(_)) => "invalid",
        }
    }
}

impl<T> From<Result<T>> for PollOutcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => PollOutcome::Success(value),
            Err(err) => PollOutcome::Failure(err),
        }
    }
}

/// Drives a read operation until it succeeds or its wait window closes.
#[derive(Debug, Clone)]
pub struct RetryCoordinator {
    wait: Option<WaitSpec>,
    cancel: CancellationToken,
}

impl RetryCoordinator {
    /// A coordinator that polls for `wait`, or makes a single attempt if
    /// `wait` is `None`.
    pub fn new(wait: Option<WaitSpec>, cancel: CancellationToken) -> Self {
        Self { wait, cancel }
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// the wait window closes, or the cancellation token fires.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let started = Instant::now();
        let deadline = self.wait.map(|w| started + w.duration());
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let outcome = self.attempt(&mut operation).await;
            metrics::record_poll_attempt(outcome.label());

            let err = match outcome {
                PollOutcome::Success(value) => {
                    tracing::debug!(
                        attempt,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Read succeeded"
                    );
                    return Ok(value);
                }
                PollOutcome::Failure(err) => err,
            };

            if !err.is_retryable() {
                return Err(err);
            }

            let Some(deadline) = deadline else {
                return Err(err);
            };

            if Instant::now() + POLL_INTERVAL > deadline {
                tracing::warn!(
                    attempt,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %err,
                    "Wait deadline reached, returning last error"
                );
                return Err(err);
            }

            tracing::debug!(attempt, error = %err, "Read failed, retrying");

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    tracing::info!(attempt, "Read cancelled while waiting");
                    return Err(Error::Cancelled);
                }
                _ = sleep(POLL_INTERVAL) => {}
            }
        }
    }

    async fn attempt<T, F, Fut>(&self, operation: &mut F) -> PollOutcome<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if self.cancel.is_cancelled() {
            return PollOutcome::Failure(Error::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => PollOutcome::Failure(Error::Cancelled),
            result = operation() => result.into(),
        }
    }
}

/// Validate `wait_for` and run `operation` under the resulting wait policy.
///
/// An empty or absent `wait_for` means a single attempt. Invalid values fail
/// before `operation` is ever called.
pub async fn read_with_wait_for<T, F, Fut>(
    wait_for: Option<&str>,
    cancel: CancellationToken,
    operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let wait = wait_for
        .filter(|raw| !raw.is_empty())
        .map(parse_wait_spec)
        .transpose()?;

    RetryCoordinator::new(wait, cancel).run(operation).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn not_found() -> Error {
        Error::NotFound {
            name: "group:eng".into(),
        }
    }

    #[test]
    fn test_wait_spec_bounds() {
        assert!(WaitSpec::new(Duration::from_secs(1)).is_err());
        assert!(WaitSpec::new(Duration::from_millis(999)).is_err());
        assert!(WaitSpec::new(Duration::from_millis(1001)).is_ok());
    }

    #[test]
    fn test_parse_wait_spec_messages() {
        let err = parse_wait_spec("soon").unwrap_err();
        assert_eq!(err.path, "wait_for");
        assert_eq!(err.message, "failed to parse wait_for");
        assert!(err.detail.unwrap().contains("soon"));

        for raw in ["1s", "1000ms", "500ms", "0", "-5s"] {
            let err = parse_wait_spec(raw).unwrap_err();
            assert_eq!(err.message, "wait_for must be greater than 1 second", "{}", raw);
            assert!(err.detail.is_none());
        }

        assert_eq!(
            parse_wait_spec("1m").unwrap().duration(),
            Duration::from_secs(60)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_attempt_without_wait() {
        let calls = Cell::new(0u32);
        let started = Instant::now();
        let coordinator = RetryCoordinator::new(None, CancellationToken::new());

        let result: Result<()> = coordinator
            .run(|| {
                calls.set(calls.get() + 1);
                async { Err(not_found()) }
            })
            .await;

        assert!(matches!(result, Err(Error::NotFound { .. })));
        assert_eq!(calls.get(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_third_attempt_after_two_sleeps() {
        let calls = Cell::new(0u32);
        let started = Instant::now();
        let wait = parse_wait_spec("5s").unwrap();
        let coordinator = RetryCoordinator::new(Some(wait), CancellationToken::new());

        let result = coordinator
            .run(|| {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move {
                    if n < 3 {
                        Err(not_found())
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(started.elapsed(), 2 * POLL_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_window_returns_last_error() {
        let calls = Cell::new(0u32);
        let started = Instant::now();
        let wait = parse_wait_spec("1500ms").unwrap();
        let coordinator = RetryCoordinator::new(Some(wait), CancellationToken::new());

        let result: Result<u32> = coordinator
            .run(|| {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move {
                    if n < 3 {
                        Err(Error::NotFound {
                            name: format!("attempt-{}", n),
                        })
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        match result {
            Err(Error::NotFound { name }) => assert_eq!(name, "attempt-2"),
            other => panic!("expected last not-found error, got {:?}", other),
        }
        assert_eq!(calls.get(), 2);
        assert_eq!(started.elapsed(), POLL_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remote_errors_are_retried() {
        let calls = Cell::new(0u32);
        let wait = parse_wait_spec("3s").unwrap();
        let coordinator = RetryCoordinator::new(Some(wait), CancellationToken::new());

        let result = coordinator
            .run(|| {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move {
                    if n == 1 {
                        Err(Error::Remote(crate::policy::PolicyError::Status {
                            status: 502,
                            body: "bad gateway".into(),
                        }))
                    } else {
                        Ok("members")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "members");
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_one_sleep() {
        let calls = Cell::new(0u32);
        let started = Instant::now();
        let cancel = CancellationToken::new();
        let wait = parse_wait_spec("10s").unwrap();
        let coordinator = RetryCoordinator::new(Some(wait), cancel.clone());

        let result: Result<()> = coordinator
            .run(|| {
                calls.set(calls.get() + 1);
                if calls.get() == 2 {
                    cancel.cancel();
                }
                async { Err(not_found()) }
            })
            .await;

        assert!(matches!(result, Err(Error::Cancelled)));
        assert_eq!(calls.get(), 2);
        assert_eq!(started.elapsed(), POLL_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_sleep() {
        let calls = Cell::new(0u32);
        let started = Instant::now();
        let cancel = CancellationToken::new();
        let wait = parse_wait_spec("10s").unwrap();
        let coordinator = RetryCoordinator::new(Some(wait), cancel.clone());

        let trigger = cancel.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(1500)).await;
            trigger.cancel();
        });

        let result: Result<()> = coordinator
            .run(|| {
                calls.set(calls.get() + 1);
                async { Err(not_found()) }
            })
            .await;

        assert!(matches!(result, Err(Error::Cancelled)));
        assert_eq!(calls.get(), 2);
        assert_eq!(started.elapsed(), Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_cancelled_before_start_makes_no_attempt() {
        let calls = Cell::new(0u32);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result: Result<()> = read_with_wait_for(Some("5s"), cancel, || {
            calls.set(calls.get() + 1);
            async { Ok(()) }
        })
        .await;

        assert!(matches!(result, Err(Error::Cancelled)));
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test]
    async fn test_invalid_wait_for_makes_no_attempt() {
        let calls = Cell::new(0u32);
        for raw in ["1s", "abc"] {
            let result: Result<()> = read_with_wait_for(Some(raw), CancellationToken::new(), || {
                calls.set(calls.get() + 1);
                async { Ok(()) }
            })
            .await;
            assert!(matches!(result, Err(Error::Validation(_))));
        }
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test]
    async fn test_empty_wait_for_is_single_attempt() {
        let calls = Cell::new(0u32);
        let result: Result<()> = read_with_wait_for(Some(""), CancellationToken::new(), || {
            calls.set(calls.get() + 1);
            async { Err(not_found()) }
        })
        .await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
        assert_eq!(calls.get(), 1);
    }
}
