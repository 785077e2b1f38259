//! # Lifecycle controller: stop/ack rendezvous for the driving loop.
//!
//! [`Control`] is held by the closer side, [`ControlToken`] by the driving
//! loop. Both share two one-shot latches:
//!
//! ```text
//! close() ──► stop.cancel() ───────────► loop: select! { stop.cancelled() => return }
//!    │                                            │
//!    │                                            ▼
//!    └─◄── done.cancelled() ◄──── ControlToken::drop() → done.cancel()
//! ```
//!
//! ## Rules
//! - The acknowledgement is the **drop** of the [`ControlToken`], so every loop
//!   exit (stop request, exhausted source, fault, panic) releases closers.
//! - If the loop is already gone, `close` returns without waiting.
//! - The first `close` wins with `Ok(())`; every later or concurrent call waits
//!   for the same acknowledgement and returns [`PipelineError::AlreadyClosed`].
//! - With a grace limit, waiting longer than `grace` yields
//!   [`PipelineError::GraceExceeded`] instead of hanging.
//! - The loop records its [`LoopExit`] before acknowledging, so it is visible
//!   to anyone released by the acknowledgement.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

use super::runner::LoopExit;
use crate::error::PipelineError;

/// Closer side of the stop protocol.
pub struct Control {
    stop: CancellationToken,
    done: CancellationToken,
    closing: AtomicBool,
    grace: Option<Duration>,
    exit: Arc<OnceLock<LoopExit>>,
}

/// Loop side of the stop protocol; dropping it acknowledges the stop.
pub(crate) struct ControlToken {
    stop: CancellationToken,
    done: CancellationToken,
    exit: Arc<OnceLock<LoopExit>>,
}

impl Control {
    /// Creates a connected controller/token pair.
    ///
    /// `grace = None` waits for the acknowledgement without limit.
    pub(crate) fn pair(grace: Option<Duration>) -> (Control, ControlToken) {
        let stop = CancellationToken::new();
        let done = CancellationToken::new();
        let exit = Arc::new(OnceLock::new());
        let token = ControlToken {
            stop: stop.clone(),
            done: done.clone(),
            exit: Arc::clone(&exit),
        };
        let control = Control {
            stop,
            done,
            closing: AtomicBool::new(false),
            grace,
            exit,
        };
        (control, token)
    }

    /// Asks the loop to stop without waiting for it.
    pub fn request_stop(&self) {
        self.stop.cancel();
    }

    /// True once the driving loop has exited.
    pub fn is_stopped(&self) -> bool {
        self.done.is_cancelled()
    }

    /// Why the driving loop exited, once it has.
    ///
    /// `None` while the loop runs, and for a loop that ended without
    /// reporting (a panic outside the filter, or no loop at all).
    pub fn exit(&self) -> Option<&LoopExit> {
        self.exit.get()
    }

    /// Configured acknowledgement limit.
    pub fn grace(&self) -> Option<Duration> {
        self.grace
    }

    /// Stops the driving loop and waits until it acknowledges.
    ///
    /// ### Returns
    /// - `Ok(())` for the first call, once the loop has exited (immediately if
    ///   it had already exited on its own);
    /// - `Err(AlreadyClosed)` for any other call, after the same acknowledgement;
    /// - `Err(GraceExceeded)` if the loop did not acknowledge within `grace`.
    pub async fn close(&self) -> Result<(), PipelineError> {
        let first = !self.closing.swap(true, Ordering::AcqRel);
        self.stop.cancel();

        match self.grace {
            None => self.done.cancelled().await,
            Some(grace) => {
                if tokio::time::timeout(grace, self.done.cancelled())
                    .await
                    .is_err()
                {
                    tracing::error!(?grace, "driving loop did not acknowledge stop");
                    return Err(PipelineError::GraceExceeded { grace });
                }
            }
        }

        if first {
            Ok(())
        } else {
            Err(PipelineError::AlreadyClosed)
        }
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("stop_requested", &self.stop.is_cancelled())
            .field("stopped", &self.is_stopped())
            .field("grace", &self.grace)
            .field("exit", &self.exit())
            .finish()
    }
}

impl ControlToken {
    /// Resolves when a stop has been requested.
    pub(crate) fn stopped(&self) -> WaitForCancellationFuture<'_> {
        self.stop.cancelled()
    }

    /// Records why the loop exited, then acknowledges.
    pub(crate) fn finish(self, exit: LoopExit) {
        let _ = self.exit.set(exit);
    }
}

impl Drop for ControlToken {
    fn drop(&mut self) {
        self.done.cancel();
    }
}
