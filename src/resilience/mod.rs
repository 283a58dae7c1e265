//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Read with wait_for:
//!     → duration.rs (parse the wait_for literal)
//!     → wait.rs (validate window, poll every second until success/deadline)
//!     → last error or result back to the caller
//! ```
//!
//! # Design Decisions
//! - Fixed interval, no backoff: the wait window is what the caller tunes
//! - Expiry reports the real failure so callers get an actionable message
//! - Cancellation wins over both an in-flight attempt and the sleep

pub mod duration;
pub mod wait;

pub use wait::{parse_wait_spec, read_with_wait_for, RetryCoordinator, WaitSpec, POLL_INTERVAL};
