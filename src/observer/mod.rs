//! Broadcast core: published-state chain, observer and subscription cursors.
//!
//! ## Architecture
//! ```text
//!                      Observer.tail (RwLock)
//!                              │
//!                              ▼
//!   [S0: Ready v0] ──► [S1: Ready v1] ──► [S2: Ready v2] ──► [S3: Pending]
//!          ▲                  ▲                                     ▲
//!       cursor A           cursor B                         cursor C (new)
//!
//! notify(v3):  S3.value = v3, S3.next = S4 (Pending), S3.ready.fire(), tail = S4
//! subscribe(): cursor at tail (sees v3 first, never v0..v2)
//! ```
//!
//! ## Rules
//! - One producer: `notify` is serialized by the write lock.
//! - A node is written once, before its [`ReadySignal`] fires; afterwards it is
//!   immutable and read without locking.
//! - Cursors only move forward, one node per value.
//! - Nodes no cursor references are freed (iteratively, no recursion).
//!
//! ## Contents
//! - [`ReadySignal`] one-shot, multi-waiter readiness latch
//! - [`Observer`] publisher side (`notify`, `subscribe`, `close`)
//! - [`Subscription`] per-subscriber cursor

mod observer;
mod signal;
mod state;
mod subscription;

pub use observer::Observer;
pub use signal::ReadySignal;
pub use subscription::Subscription;
