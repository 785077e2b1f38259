//! Runtime core: pipeline wiring and lifecycle.
//!
//! This module contains the pieces that turn a [`Source`](crate::Source), a
//! [`Filter`](crate::Filter) and an [`Observer`](crate::Observer) into a
//! running [`Pipeline`].
//!
//! Internal modules:
//! - [`runner`]: the driving loop (select on stop vs. input, decide, notify);
//! - [`control`]: stop/ack rendezvous with idempotent, grace-bounded `close`;
//! - [`builder`]: wires controller, observer and loop task;
//! - [`pipeline`]: the user-facing handle;
//! - [`config`]: pipeline settings.

mod builder;
mod config;
mod control;
mod pipeline;
mod runner;

pub use builder::PipelineBuilder;
pub use config::{MIN_REFRESH, PipelineConfig};
pub use control::Control;
pub use pipeline::Pipeline;
pub use runner::LoopExit;
