//! # One-shot readiness latch.
//!
//! [`ReadySignal`] starts unsignalled and is fired at most once; every waiter,
//! past and future, is released when it fires. It is a thin wrapper over
//! [`CancellationToken`], which already has exactly these semantics.

use std::time::Duration;

use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

use crate::error::PipelineError;

/// Waitable handle for "the value of this node is available".
///
/// Cheap to clone; all clones observe the same latch.
#[derive(Clone, Debug, Default)]
pub struct ReadySignal {
    token: CancellationToken,
}

impl ReadySignal {
    /// Creates an unsignalled latch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires the latch. Idempotent.
    pub(crate) fn fire(&self) {
        self.token.cancel();
    }

    /// True once the latch has fired.
    pub fn is_ready(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Waits until the latch fires.
    ///
    /// Cancel-safe: dropping the future (e.g. losing a `select!`) has no
    /// effect on the latch or on other waiters.
    pub async fn wait(&self) {
        self.token.cancelled().await;
    }

    /// Owned wait future, for storing in structs or moving into tasks.
    pub fn wait_owned(self) -> WaitForCancellationFutureOwned {
        self.token.cancelled_owned()
    }

    /// Waits for the latch, giving up after `timeout`.
    pub async fn wait_timeout(&self, timeout: Duration) -> Result<(), PipelineError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_elapsed| PipelineError::Timeout { timeout })
    }
}
