//! ACL group reader.
//!
//! Resolves a named group in a tailnet's access-control policy to its member
//! list, optionally polling until a recently written group becomes visible.
//!
//! ```text
//!   GroupQuery ──▶ groups::read_group
//!                      │
//!                      ▼
//!              resilience::wait ──(every 1s until wait_for elapses)──┐
//!                      │                                            │
//!                      ▼                                            │
//!              policy::PolicyClient ──▶ groups::resolve ──▶ materialize
//!                                                 │
//!                                   NotFound / Remote error ────────┘
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod groups;
pub mod lifecycle;
pub mod observability;
pub mod policy;
pub mod resilience;

pub use config::ClientConfig;
pub use error::{Error, Result, ValidationError};
pub use groups::{read_group, GroupQuery, ResolutionResult};
pub use lifecycle::Shutdown;
pub use policy::{FilePolicyClient, HttpPolicyClient, PolicyClient, PolicyDocument};
