//! # Trigger filters.
//!
//! Triggers decide on a value and publish it unchanged.
//!
//! | Filter           | Fires when                                   |
//! |------------------|----------------------------------------------|
//! | [`OnChange`]     | value differs from the last accepted one     |
//! | [`OnValue`]      | value equals a fixed target                  |
//! | [`AboveFloat64`] | number is strictly above a threshold         |
//! | [`BelowFloat64`] | number is strictly below a threshold         |
//! | [`Mute`]         | at least `period` elapsed since the last fire |

use std::time::Duration;

use tokio::time::Instant;

use crate::error::FilterError;
use crate::filters::Filter;
use crate::value::Value;

/// Fires when the value differs from the last accepted one.
#[derive(Debug, Default, Clone)]
pub struct OnChange {
    last: Option<Value>,
}

impl OnChange {
    /// Unseeded: the first value always fires.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded with an initial value that will **not** fire.
    pub fn seeded(initial: impl Into<Value>) -> Self {
        Self {
            last: Some(initial.into()),
        }
    }
}

impl Filter for OnChange {
    fn check(&mut self, value: &Value) -> Result<bool, FilterError> {
        Ok(self.last.as_ref() != Some(value))
    }

    fn update(&mut self, value: Value) -> Value {
        self.last = Some(value.clone());
        value
    }
}

/// Fires when the value equals `target`.
#[derive(Debug, Clone)]
pub struct OnValue {
    target: Value,
}

impl OnValue {
    /// Creates a trigger for `target`.
    pub fn new(target: impl Into<Value>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl Filter for OnValue {
    fn check(&mut self, value: &Value) -> Result<bool, FilterError> {
        Ok(*value == self.target)
    }

    fn update(&mut self, value: Value) -> Value {
        value
    }
}

/// Fires when the number is strictly greater than `threshold`.
///
/// Non-numeric input is a [`FilterError::TypeMismatch`].
#[derive(Debug, Clone, Copy)]
pub struct AboveFloat64 {
    threshold: f64,
}

impl AboveFloat64 {
    /// Creates a trigger with the given threshold.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// The configured threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Filter for AboveFloat64 {
    fn check(&mut self, value: &Value) -> Result<bool, FilterError> {
        Ok(value.as_f64()? > self.threshold)
    }

    fn update(&mut self, value: Value) -> Value {
        value
    }
}

/// Fires when the number is strictly less than `threshold`.
///
/// Non-numeric input is a [`FilterError::TypeMismatch`].
#[derive(Debug, Clone, Copy)]
pub struct BelowFloat64 {
    threshold: f64,
}

impl BelowFloat64 {
    /// Creates a trigger with the given threshold.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// The configured threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Filter for BelowFloat64 {
    fn check(&mut self, value: &Value) -> Result<bool, FilterError> {
        Ok(value.as_f64()? < self.threshold)
    }

    fn update(&mut self, value: Value) -> Value {
        value
    }
}

/// Suppresses values for `period` after each fire.
///
/// The fire time is recorded by `check`. Time is read from
/// [`tokio::time::Instant`], so a paused test clock drives it.
#[derive(Debug, Clone)]
pub struct Mute {
    period: Duration,
    last: Option<Instant>,
}

impl Mute {
    /// Creates a mute filter with the given suppression period.
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    /// The configured suppression period.
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Filter for Mute {
    fn check(&mut self, _value: &Value) -> Result<bool, FilterError> {
        let now = Instant::now();
        let open = self
            .last
            .is_none_or(|at| now.saturating_duration_since(at) >= self.period);
        if open {
            self.last = Some(now);
        }
        Ok(open)
    }

    fn update(&mut self, value: Value) -> Value {
        value
    }
}
