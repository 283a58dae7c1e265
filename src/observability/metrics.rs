//! Metrics collection.
//!
//! # Metrics
//! - `acl_groups_poll_attempts_total` (counter): attempts by `outcome`
//!   (`success`, `not_found`, `remote_error`, `cancelled`, `invalid`)
//! - `acl_groups_resolutions_total` (counter): finished reads by `result`

/// Record one read attempt.
pub fn record_poll_attempt(outcome: &'static str) {
    ::metrics::counter!("acl_groups_poll_attempts_total", "outcome" => outcome).increment(1);
}

/// Record the final result of a group read.
pub fn record_resolution(result: &'static str) {
    ::metrics::counter!("acl_groups_resolutions_total", "result" => result).increment(1);
}
