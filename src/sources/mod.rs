//! # Raw-value sources feeding a pipeline.
//!
//! A [`Source`] produces raw values for the driving loop; the loop races every
//! `next()` against the stop request.
//!
//! ```text
//!   FuncSource: interval tick ──► f() ──┐
//!                                       ├──► Source::next() ──► loop ──► Filter ──► Observer
//!   ChanSource: mpsc::Receiver ─────────┘
//! ```
//!
//! ## Implementing custom sources
//! ```no_run
//! use async_trait::async_trait;
//! use pipecast::{Source, Value};
//!
//! struct Counter(i64);
//!
//! #[async_trait]
//! impl Source for Counter {
//!     async fn next(&mut self) -> Option<Value> {
//!         tokio::time::sleep(std::time::Duration::from_millis(10)).await;
//!         self.0 += 1;
//!         Some(Value::Int(self.0))
//!     }
//! }
//! ```

mod chan;
mod func;
mod source;

pub use chan::ChanSource;
pub use func::FuncSource;
pub use source::Source;
