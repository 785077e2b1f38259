//! # Ordered OR of filters.
//!
//! [`FirstMatch`] tries each filter against the **original** value and
//! publishes the output of the first one that accepts. Filters after the
//! winner are not consulted for that value.

use crate::error::FilterError;
use crate::filters::Filter;
use crate::value::Value;

/// Switch over alternatives; the first accepting filter wins.
///
/// ## Example
/// ```rust
/// use pipecast::{AboveFloat64, BelowFloat64, Filter, FirstMatch, Value};
///
/// let mut collar = FirstMatch::or(AboveFloat64::new(1.0), BelowFloat64::new(-1.0));
/// assert_eq!(collar.check(&Value::Float(0.5)), Ok(false));
/// assert_eq!(collar.check(&Value::Float(-1.2)), Ok(true));
/// assert_eq!(collar.update(Value::Float(-1.2)), Value::Float(-1.2));
/// ```
#[derive(Default)]
pub struct FirstMatch {
    filters: Vec<Box<dyn Filter>>,
    value: Option<Value>,
}

impl FirstMatch {
    /// Creates a switch with no alternatives (rejects everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Binary form: `left`, otherwise `right`.
    pub fn or(left: impl Filter, right: impl Filter) -> Self {
        Self::new().case(left).case(right)
    }

    /// Appends an alternative.
    #[must_use]
    pub fn case(mut self, filter: impl Filter) -> Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl From<Vec<Box<dyn Filter>>> for FirstMatch {
    fn from(filters: Vec<Box<dyn Filter>>) -> Self {
        Self {
            filters,
            value: None,
        }
    }
}

impl Filter for FirstMatch {
    fn check(&mut self, value: &Value) -> Result<bool, FilterError> {
        self.value = None;
        for f in &mut self.filters {
            if f.check(value)? {
                self.value = Some(f.update(value.clone()));
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn update(&mut self, value: Value) -> Value {
        self.value.take().unwrap_or(value)
    }
}
