//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Cancellation (shutdown.rs):
//!     Shutdown::trigger → every token handed out is cancelled
//!     → wait loops abort with Error::Cancelled
//!
//! Signals (signals.rs):
//!     SIGINT (Ctrl-C) → Shutdown::trigger
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
