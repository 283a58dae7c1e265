//! Group resolution.
//!
//! # Data Flow
//! ```text
//! GroupQuery { name, wait_for }
//!     → read.rs (validate, then poll via resilience::wait)
//!         → PolicyClient::fetch_policy
//!         → resolver.rs (exact-key lookup)
//!         → materializer.rs (ResolutionResult { id, members })
//! ```
//!
//! # Design Decisions
//! - Read-only: groups are never created or modified here
//! - No cross-invocation cache; every read polls from scratch
//! - The identifier depends only on the group name

pub mod materializer;
pub mod read;
pub mod resolver;

pub use materializer::{materialize, ResolutionResult};
pub use read::{read_group, GroupQuery};
pub use resolver::resolve;
