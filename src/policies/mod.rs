//! Fault-handling policies.
//!
//! This module groups the knobs that control what the driving loop does when
//! a filter fails on a value.
//!
//! ## Contents
//! - [`FaultPolicy`] reject the value and keep going, or stop the loop
//!
//! ## Quick wiring
//! ```text
//! PipelineConfig { fault_policy: FaultPolicy, .. }
//!      └─► core::runner::drive uses:
//!           - Reject → log warn, drop the value, wait for the next input
//!           - Stop   → log error, exit the loop (acknowledges any closer)
//! ```
//!
//! ## Defaults
//! - `FaultPolicy::Reject`.

mod fault;

pub use fault::FaultPolicy;
