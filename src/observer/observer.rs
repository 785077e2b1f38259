//! # Observer: the publishing side of the broadcast core.
//!
//! [`Observer`] owns the tail of the published-state chain. `notify` appends,
//! `subscribe` hands out a cursor at the current tail. Both touch the tail
//! pointer under one [`RwLock`]; nothing else is shared and mutable.
//!
//! ## Example
//! ```rust
//! use pipecast::{Observer, Value};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let observer = Observer::new();
//! let mut early = observer.subscribe();
//!
//! observer.notify(Value::Int(1));
//! let mut late = observer.subscribe();
//! observer.notify(Value::Int(2));
//!
//! assert_eq!(early.recv().await, Value::Int(1));
//! assert_eq!(early.recv().await, Value::Int(2));
//! assert_eq!(late.recv().await, Value::Int(2));
//! # }
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::core::Control;
use crate::error::PipelineError;
use crate::observer::Subscription;
use crate::observer::state::State;
use crate::value::Value;

/// Single-producer, multi-consumer broadcaster of published values.
pub struct Observer {
    tail: RwLock<Arc<State>>,
    published: AtomicU64,
    control: Control,
}

impl Observer {
    /// Creates an observer that is fed manually through [`Observer::notify`].
    ///
    /// No driving loop is attached, so [`Observer::close`] returns at once.
    pub fn new() -> Self {
        let (control, token) = Control::pair(None);
        drop(token);
        Self::with_control(control)
    }

    pub(crate) fn with_control(control: Control) -> Self {
        Self {
            tail: RwLock::new(State::pending()),
            published: AtomicU64::new(0),
            control,
        }
    }

    /// Publishes `value` as the next event.
    ///
    /// Every outstanding [`Subscription`] observes it exactly once, in order.
    /// Intended for one producer; concurrent callers are serialized.
    pub fn notify(&self, value: Value) {
        let mut tail = self.tail.write();
        let next = tail.publish(value);
        *tail = next;
        let seq = self.published.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::trace!(seq, "value published");
    }

    /// Returns a cursor that will see every value published from now on.
    ///
    /// Values published before this call are never delivered to it.
    pub fn subscribe(&self) -> Subscription {
        let tail = Arc::clone(&*self.tail.read());
        Subscription::new(tail)
    }

    /// Number of values published so far.
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Acquire)
    }

    /// Lifecycle controller of the driving loop feeding this observer.
    pub fn control(&self) -> &Control {
        &self.control
    }

    /// Stops the driving loop and waits for its acknowledgement.
    ///
    /// Subscribers waiting for the next value stay blocked: the tail simply
    /// never becomes ready. Race their waits against a timeout or a
    /// cancellation if they must return.
    ///
    /// See [`Control::close`] for the idempotence rules.
    pub async fn close(&self) -> Result<(), PipelineError> {
        self.control.close().await
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("published", &self.published())
            .field("stopped", &self.control.is_stopped())
            .finish_non_exhaustive()
    }
}
