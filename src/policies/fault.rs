//! # Fault policy for the driving loop.
//!
//! [`FaultPolicy`] determines what happens after a filter returns an error (or
//! panics) for a raw value. The faulty value is never published either way.
//!
//! - [`FaultPolicy::Reject`] treat the fault as a rejection and keep running (default).
//! - [`FaultPolicy::Stop`] terminate the driving loop.
//!
//! ## Choosing the right policy
//! ```text
//! Noisy sources, occasional bad samples   → Reject
//! Misconfigured pipelines must fail fast  → Stop
//! Filters that may panic mid-update       → Stop (their state may be torn)
//! ```

/// Policy controlling the driving loop's reaction to filter faults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FaultPolicy {
    /// Drop the value, log a warning and wait for the next input.
    #[default]
    Reject,
    /// Log an error and stop the driving loop.
    Stop,
}

impl FaultPolicy {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            FaultPolicy::Reject => "reject",
            FaultPolicy::Stop => "stop",
        }
    }
}
