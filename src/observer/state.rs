//! # Published-state node.
//!
//! ```text
//! Pending ──publish(v)──► Ready { value: v, next: Pending' }   (terminal)
//! ```
//!
//! The slot is written exactly once, then the signal fires. Readers never need
//! the signal to read safely: the slot itself is a [`OnceLock`].

use std::sync::{Arc, OnceLock};

use crate::observer::ReadySignal;
use crate::value::Value;

/// Frozen contents of a ready node.
pub(crate) struct Published {
    pub(crate) value: Value,
    pub(crate) next: Arc<State>,
}

/// One node of the forward-only version chain.
pub(crate) struct State {
    ready: ReadySignal,
    slot: OnceLock<Published>,
}

impl State {
    /// Allocates a new pending node.
    pub(crate) fn pending() -> Arc<Self> {
        Arc::new(Self {
            ready: ReadySignal::new(),
            slot: OnceLock::new(),
        })
    }

    /// Freezes `value` into this node, links a fresh successor and fires the
    /// signal. Returns the successor (the new tail).
    ///
    /// Must only be called by the single producer holding the tail lock.
    pub(crate) fn publish(&self, value: Value) -> Arc<State> {
        let next = State::pending();
        let fresh = self
            .slot
            .set(Published {
                value,
                next: Arc::clone(&next),
            })
            .is_ok();
        debug_assert!(fresh, "published-state node written twice");
        self.ready.fire();
        next
    }

    /// Contents, once the node is ready.
    pub(crate) fn published(&self) -> Option<&Published> {
        self.slot.get()
    }

    pub(crate) fn ready(&self) -> &ReadySignal {
        &self.ready
    }
}

impl Drop for State {
    /// Unlinks the successors we solely own one by one, so dropping a long
    /// unread chain cannot overflow the stack.
    fn drop(&mut self) {
        let mut next = self.slot.take().map(|p| p.next);
        while let Some(node) = next {
            next = match Arc::try_unwrap(node) {
                Ok(mut state) => state.slot.take().map(|p| p.next),
                Err(_shared) => None,
            };
        }
    }
}
