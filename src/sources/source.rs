//! # Core source trait
//!
//! `Source` is the extension point for plugging raw-value producers into a
//! pipeline. The driving loop owns the source and polls it from one task.
//!
//! ## Contract
//! - `next` must be **cancel-safe**: the loop drops the pending future when a
//!   stop request wins the race, and no value may be lost by that.
//! - Returning `None` means the source is exhausted; the loop exits.

use async_trait::async_trait;

use crate::value::Value;

/// Contract for raw-value producers.
#[async_trait]
pub trait Source: Send + 'static {
    /// Waits for the next raw value; `None` ends the pipeline.
    async fn next(&mut self) -> Option<Value>;

    /// Human-readable name (for logs).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
