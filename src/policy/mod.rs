//! Policy document access.
//!
//! # Data Flow
//! ```text
//! read attempt
//!     → client.rs (PolicyClient::fetch_policy)
//!         → HttpPolicyClient: GET /api/v2/tailnet/{tailnet}/acl
//!         → FilePolicyClient: local JSON file
//!     → types.rs (PolicyDocument, decoded fresh per attempt)
//! ```
//!
//! # Design Decisions
//! - Every fetch returns a new document; nothing is cached between attempts
//! - Collaborators are passed explicitly, never recovered from a context bag
//! - API keys come only from the environment and are never logged

pub mod client;
pub mod file;
pub mod types;

pub use client::{HttpPolicyClient, PolicyClient, API_KEY_ENV_VAR};
pub use file::FilePolicyClient;
pub use types::{PolicyDocument, PolicyError, PolicyResult};
