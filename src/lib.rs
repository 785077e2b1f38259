//! # pipecast
//!
//! **Pipecast** is a small single-producer, multi-consumer broadcasting library
//! for Rust.
//!
//! A pipeline pulls raw values from a source, decides through a filter which of
//! them become events, and broadcasts every accepted value to any number of
//! subscribers. Each subscriber walks the same sequence of values at its own
//! pace, with no per-subscriber queues and no fan-out tasks.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ┌──────────────┐        ┌──────────────┐
//!   │  FuncSource  │   or   │  ChanSource  │   (anything implementing Source)
//!   │ (timer tick) │        │  (mpsc rx)   │
//!   └──────┬───────┘        └──────┬───────┘
//!          └────────────┬──────────┘
//!                       ▼  raw value
//! ┌───────────────────────────────────────────────────────────────┐
//! │  driving loop (one tokio task per pipeline)                   │
//! │  - select! biased: stop request first, then source.next()     │
//! │  - Filter::check ─► Filter::update  (Chain / FirstMatch / ..) │
//! │  - FaultPolicy on Err or panic                                │
//! └───────────────────────┬───────────────────────────────────────┘
//!                         ▼  accepted value
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Observer                                                     │
//! │                                                               │
//! │   [v1]──►[v2]──►[v3]──►[ pending tail ]                       │
//! │     ▲             ▲            ▲                              │
//! │   sub A         sub B        sub C (fresh subscribe)          │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! Pipeline::builder(cfg).with_filter(f).spawn(source)
//!
//! loop {
//!   ├─ stop requested       ─► exit, ack
//!   ├─ source exhausted     ─► exit, ack
//!   └─ raw value
//!        ├─ check Ok(true)  ─► update ─► notify
//!        ├─ check Ok(false) ─► dropped
//!        └─ fault / panic   ─► Reject: warn, continue
//!                              Stop:   error, exit, ack
//! }
//!
//! pipeline.close() ─► request stop ─► wait for ack (bounded by cfg.grace)
//!                     first caller Ok(()), everyone else AlreadyClosed
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                              |
//! |-------------------|---------------------------------------------------------------|-------------------------------------------------|
//! | **Filters**       | Decide and transform; compose sequentially or by first match. | [`Filter`], [`Chain`], [`FirstMatch`]           |
//! | **Triggers**      | Publish on change, on equality, on thresholds, rate limited.  | [`OnChange`], [`OnValue`], [`AboveFloat64`], [`Mute`] |
//! | **Statistics**    | Windowed averages and deviation detectors, low-pass.          | [`MovingAverage`], [`Stddev`], [`Sigma`], [`LowPass`] |
//! | **Broadcast**     | Shared chain of published states, per-subscriber cursors.     | [`Observer`], [`Subscription`], [`ReadySignal`] |
//! | **Sources**       | Timer-driven function or inbound channel.                     | [`Source`], [`FuncSource`], [`ChanSource`]      |
//! | **Lifecycle**     | Spawn, subscribe, idempotent grace-bounded close, exit reason.| [`Pipeline`], [`Control`], [`LoopExit`]         |
//! | **Errors**        | Typed filter faults and lifecycle errors.                     | [`FilterError`], [`PipelineError`]              |
//! | **Configuration** | Name, refresh period, grace, fault policy.                    | [`PipelineConfig`], [`FaultPolicy`]             |
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use pipecast::{FirstMatch, FuncSource, MovingAverage, OnChange, Pipeline, PipelineConfig, Value};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut cfg = PipelineConfig::named("temperature");
//!     cfg.refresh = Duration::from_millis(5);
//!
//!     // Poll a reading on every tick
//!     let mut reading = 20;
//!     let source = FuncSource::from_config(&cfg, move || {
//!         reading += 1;
//!         Value::from(reading)
//!     });
//!
//!     // Publish changes only
//!     let pipeline = Pipeline::builder(cfg)
//!         .with_filter(OnChange::new())
//!         .spawn(source);
//!
//!     let mut sub = pipeline.subscribe();
//!     let first = sub.recv_timeout(Duration::from_secs(1)).await?;
//!     let second = sub.recv_timeout(Duration::from_secs(1)).await?;
//!     assert_ne!(first, second);
//!
//!     pipeline.close().await?;
//!
//!     // Filters also work standalone
//!     let _ = FirstMatch::or(OnChange::new(), MovingAverage::new(3));
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod filters;
mod observer;
mod policies;
mod sources;
mod value;

// ---- Public re-exports ----

pub use core::{Control, LoopExit, MIN_REFRESH, Pipeline, PipelineBuilder, PipelineConfig};
pub use error::{FilterError, PipelineError};
pub use filters::{
    AboveFloat64, BelowFloat64, Chain, Filter, FirstMatch, LowPass, MovingAverage, Mute, OnChange,
    OnValue, Pass, Print, Sigma, Sink, Stddev,
};
pub use observer::{Observer, ReadySignal, Subscription};
pub use policies::FaultPolicy;
pub use sources::{ChanSource, FuncSource, Source};
pub use value::Value;
