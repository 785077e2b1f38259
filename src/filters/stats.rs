//! # Statistical filters over a numeric stream.
//!
//! All of these require numeric input ([`Value::Int`] or [`Value::Float`]);
//! anything else is a [`FilterError::TypeMismatch`]. Window sizes of zero are
//! clamped to one.
//!
//! | Filter            | Fires           | Publishes                                   |
//! |-------------------|-----------------|---------------------------------------------|
//! | [`MovingAverage`] | always          | mean of the last `window` values            |
//! | [`Stddev`]        | always          | population std dev of the last `window`     |
//! | [`LowPass`]       | always          | `a*x + (1-a)*y_prev` (starts from `0.0`)    |
//! | [`Sigma`]         | on outliers     | the input, unchanged                        |

use std::collections::VecDeque;

use crate::error::FilterError;
use crate::filters::Filter;
use crate::value::Value;

/// Bounded window of the most recent samples.
#[derive(Debug, Clone)]
struct Window {
    size: usize,
    values: VecDeque<f64>,
}

impl Window {
    fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            values: VecDeque::new(),
        }
    }

    fn push(&mut self, x: f64) {
        if self.values.len() == self.size {
            self.values.pop_front();
        }
        self.values.push_back(x);
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Sum of squared deviations from the mean.
    fn sum_sq(&self) -> f64 {
        let mean = self.mean();
        self.values.iter().map(|x| (x - mean).powi(2)).sum()
    }

    fn population_stddev(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        (self.sum_sq() / self.values.len() as f64).sqrt()
    }

    fn sample_stddev(&self) -> f64 {
        if self.values.len() < 2 {
            return 0.0;
        }
        (self.sum_sq() / (self.values.len() - 1) as f64).sqrt()
    }
}

/// Arithmetic mean of the last `window` values.
///
/// # Example
/// ```rust
/// use pipecast::{Filter, MovingAverage, Value};
///
/// let mut avg = MovingAverage::new(2);
/// for x in [1.0, 3.0] {
///     assert_eq!(avg.check(&Value::Float(x)), Ok(true));
/// }
/// assert_eq!(avg.update(Value::Float(3.0)), Value::Float(2.0));
/// ```
#[derive(Debug, Clone)]
pub struct MovingAverage {
    window: Window,
    output: f64,
}

impl MovingAverage {
    /// Creates a moving average over `window` samples.
    pub fn new(window: usize) -> Self {
        Self {
            window: Window::new(window),
            output: 0.0,
        }
    }
}

impl Filter for MovingAverage {
    fn check(&mut self, value: &Value) -> Result<bool, FilterError> {
        self.window.push(value.as_f64()?);
        self.output = self.window.mean();
        Ok(true)
    }

    fn update(&mut self, _value: Value) -> Value {
        Value::Float(self.output)
    }
}

/// Population standard deviation of the last `window` values.
#[derive(Debug, Clone)]
pub struct Stddev {
    window: Window,
    output: f64,
}

impl Stddev {
    /// Creates a running standard deviation over `window` samples.
    pub fn new(window: usize) -> Self {
        Self {
            window: Window::new(window),
            output: 0.0,
        }
    }
}

impl Filter for Stddev {
    fn check(&mut self, value: &Value) -> Result<bool, FilterError> {
        self.window.push(value.as_f64()?);
        self.output = self.window.population_stddev();
        Ok(true)
    }

    fn update(&mut self, _value: Value) -> Value {
        Value::Float(self.output)
    }
}

/// Outlier detector: fires when a value lies more than `factor` sample
/// standard deviations away from the mean of the previous `window` values.
///
/// Needs at least two previous values before it can fire.
///
/// A threshold detector, not a distance scorer: accepted values are published
/// unchanged, never replaced by their sigma distance.
#[derive(Debug, Clone)]
pub struct Sigma {
    window: Window,
    factor: f64,
}

impl Sigma {
    /// Creates a detector over `window` previous samples.
    pub fn new(window: usize, factor: f64) -> Self {
        Self {
            window: Window::new(window),
            factor,
        }
    }
}

impl Filter for Sigma {
    fn check(&mut self, value: &Value) -> Result<bool, FilterError> {
        let x = value.as_f64()?;
        let fire = self.window.len() >= 2
            && (x - self.window.mean()).abs() > self.factor * self.window.sample_stddev();
        self.window.push(x);
        Ok(fire)
    }

    fn update(&mut self, value: Value) -> Value {
        value
    }
}

/// First-order low-pass filter (exponential smoothing).
#[derive(Debug, Clone)]
pub struct LowPass {
    a: f64,
    state: f64,
}

impl LowPass {
    /// Creates a filter with smoothing factor `a` (`1.0` = no smoothing).
    pub fn new(a: f64) -> Self {
        Self { a, state: 0.0 }
    }
}

impl Filter for LowPass {
    fn check(&mut self, value: &Value) -> Result<bool, FilterError> {
        let x = value.as_f64()?;
        self.state = self.a * x + (1.0 - self.a) * self.state;
        Ok(true)
    }

    fn update(&mut self, _value: Value) -> Value {
        Value::Float(self.state)
    }
}
