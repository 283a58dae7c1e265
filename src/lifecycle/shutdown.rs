//! Cancellation coordination for in-flight reads.

use tokio_util::sync::CancellationToken;

/// Coordinator for aborting reads.
///
/// Hands out tokens that all fire when [`Shutdown::trigger`] is called,
/// including tokens requested after the trigger.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    token: CancellationToken,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that is cancelled when this coordinator triggers.
    pub fn subscribe(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Trigger cancellation.
    pub fn trigger(&self) {
        self.token.cancel();
    }

    /// Whether cancellation has been triggered.
    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }
}
