//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Read path produces:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (attempt and resolution counters)
//!
//! Consumers:
//!     → stderr (pretty or JSON lines)
//!     → whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Logs go to stderr so stdout stays machine-readable
//! - Metrics use the `metrics` facade; without a recorder they cost nothing

pub mod logging;
pub mod metrics;
