//! # Sequential AND of filters.
//!
//! [`Chain`] runs its filters in order against a running value:
//! ```text
//! running = v
//! for f in filters:
//!   ├─► f.check(running) == false → reject (short-circuit)
//!   └─► running = f.update(running)
//! accept; update() returns running
//! ```

use crate::error::FilterError;
use crate::filters::Filter;
use crate::value::Value;

/// Filters applied one after another; every stage must accept.
///
/// ## Example
/// ```rust
/// use pipecast::{Chain, Filter, OnChange, OnValue, Value};
///
/// let mut chain = Chain::new().then(OnChange::new()).then(OnValue::new(3));
///
/// assert_eq!(chain.check(&Value::Int(1)), Ok(false));
/// assert_eq!(chain.check(&Value::Int(3)), Ok(true));
/// assert_eq!(chain.update(Value::Int(3)), Value::Int(3));
/// assert_eq!(chain.check(&Value::Int(3)), Ok(false)); // unchanged
/// ```
#[derive(Default)]
pub struct Chain {
    filters: Vec<Box<dyn Filter>>,
    value: Option<Value>,
}

impl Chain {
    /// Creates an empty chain (accepts everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter to the end of the chain.
    #[must_use]
    pub fn then(mut self, filter: impl Filter) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True if the chain has no stages.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl From<Vec<Box<dyn Filter>>> for Chain {
    fn from(filters: Vec<Box<dyn Filter>>) -> Self {
        Self {
            filters,
            value: None,
        }
    }
}

impl Filter for Chain {
    fn check(&mut self, value: &Value) -> Result<bool, FilterError> {
        self.value = None;
        let mut running = value.clone();
        for f in &mut self.filters {
            if !f.check(&running)? {
                return Ok(false);
            }
            running = f.update(running);
        }
        self.value = Some(running);
        Ok(true)
    }

    /// Returns the value threaded through the last successful `check`.
    ///
    /// The argument is only used if `check` was never called.
    fn update(&mut self, value: Value) -> Value {
        self.value.take().unwrap_or(value)
    }
}
