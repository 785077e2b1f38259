//! # Decision unit contract.
//!
//! [`Filter`] is the extension point for deciding which raw values become
//! published events. The driving loop calls it from a single task only, so
//! implementations own their state and take `&mut self`.
//!
//! ## Contract
//! - `update` is only called with the value for which the immediately preceding
//!   `check` returned `Ok(true)`.
//! - `check` may advance internal state (windows, timestamps); the filter models
//!   one forward pass over the stream, never a replay.
//! - Returning `Err` aborts processing of that one value.
//!
//! ## Custom filters
//! Wrap [`Pass`] and override only what differs:
//! ```rust
//! use pipecast::{Filter, FilterError, Pass, Value};
//!
//! struct Doubler {
//!     inner: Pass,
//! }
//!
//! impl Filter for Doubler {
//!     fn check(&mut self, value: &Value) -> Result<bool, FilterError> {
//!         value.as_f64()?;
//!         self.inner.check(value)
//!     }
//!
//!     fn update(&mut self, value: Value) -> Value {
//!         Value::Float(value.to_f64_lossy() * 2.0)
//!     }
//! }
//!
//! let mut d = Doubler { inner: Pass };
//! assert_eq!(d.check(&Value::Int(2)), Ok(true));
//! assert_eq!(d.update(Value::Int(2)), Value::Float(4.0));
//! ```

use crate::error::FilterError;
use crate::value::Value;

/// Stateful predicate + transform pair.
pub trait Filter: Send + 'static {
    /// Decides whether `value` should be published.
    fn check(&mut self, value: &Value) -> Result<bool, FilterError>;

    /// Produces the value to publish for an accepted input.
    fn update(&mut self, value: Value) -> Value;
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    fn check(&mut self, value: &Value) -> Result<bool, FilterError> {
        (**self).check(value)
    }

    fn update(&mut self, value: Value) -> Value {
        (**self).update(value)
    }
}

/// Accepts every value and publishes it unchanged.
///
/// The default filter of a pipeline, and the building block custom filters
/// delegate to.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pass;

impl Filter for Pass {
    fn check(&mut self, _value: &Value) -> Result<bool, FilterError> {
        Ok(true)
    }

    fn update(&mut self, value: Value) -> Value {
        value
    }
}

/// Rejects every value.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sink;

impl Filter for Sink {
    fn check(&mut self, _value: &Value) -> Result<bool, FilterError> {
        Ok(false)
    }

    fn update(&mut self, value: Value) -> Value {
        value
    }
}
