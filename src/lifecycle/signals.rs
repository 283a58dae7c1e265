//! OS signal handling.
//!
//! # Responsibilities
//! - Translate Ctrl-C into a cancellation of the running read

use crate::lifecycle::shutdown::Shutdown;

/// Wait for Ctrl-C and trigger `shutdown`.
pub async fn cancel_on_ctrl_c(shutdown: Shutdown) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Interrupt received, cancelling read");
            shutdown.trigger();
        }
        Err(e) => tracing::error!(error = %e, "Failed to listen for interrupt signal"),
    }
}
