//! # Values flowing through a pipeline.
//!
//! [`Value`] is the tagged union every filter consumes and produces, so that a
//! single [`Chain`](crate::Chain) may mix numeric, textual and user-defined
//! stages.
//!
//! ## Equality
//! - Scalar variants compare structurally and never across variants
//!   (`Int(1) != Float(1.0)`).
//! - `Custom` values compare by identity (same `Arc` allocation).
//!
//! ## Numeric access
//! - [`Value::as_f64`] is strict: anything but `Int`/`Float` is a
//!   [`FilterError::TypeMismatch`].
//! - [`Value::to_f64_lossy`] is the documented coercion: non-numeric values map to `0.0`.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::FilterError;

/// A value produced by a source, transformed by filters and published to subscribers.
#[derive(Clone)]
pub enum Value {
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Text.
    Str(String),
    /// Boolean flag.
    Bool(bool),
    /// Arbitrary user payload, shared between subscribers.
    Custom(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Wraps a user payload into [`Value::Custom`].
    pub fn custom<T: Any + Send + Sync>(payload: T) -> Self {
        Value::Custom(Arc::new(payload))
    }

    /// Short name of the variant, used in fault reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bool(_) => "bool",
            Value::Custom(_) => "custom",
        }
    }

    /// Returns the numeric value as `f64`, failing on non-numeric variants.
    ///
    /// # Example
    /// ```
    /// use pipecast::Value;
    ///
    /// assert_eq!(Value::Int(2).as_f64(), Ok(2.0));
    /// assert!(Value::from("x").as_f64().is_err());
    /// ```
    pub fn as_f64(&self) -> Result<f64, FilterError> {
        match self {
            Value::Int(i) => Ok(*i as f64),
            Value::Float(f) => Ok(*f),
            other => Err(FilterError::TypeMismatch {
                expected: "number",
                found: other.kind(),
            }),
        }
    }

    /// Coerces the value to `f64`; non-numeric values become `0.0`.
    ///
    /// Use only where silently treating text or payloads as zero is intended.
    pub fn to_f64_lossy(&self) -> f64 {
        self.as_f64().unwrap_or(0.0)
    }

    /// Returns the float payload, if this is a [`Value::Float`].
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is a [`Value::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the text payload, if this is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Downcasts a [`Value::Custom`] payload.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Custom(any) => any.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Custom(a), Value::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Custom(_) => f.write_str("<custom>"),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(i64::from(v))
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_cross_variant_equality() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::from("1"), Value::Int(1));
        assert_eq!(Value::from(3), Value::Int(3));
    }

    #[test]
    fn test_custom_compares_by_identity() {
        let a = Value::custom(7u32);
        let b = a.clone();
        let c = Value::custom(7u32);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.downcast_ref::<u32>(), Some(&7));
    }

    #[test]
    fn test_lossy_coercion() {
        let inputs = [
            Value::from(1i32),
            Value::from(2i16),
            Value::from(3i64),
            Value::from(5.0f32),
            Value::from(6.0f64),
            Value::from("1"),
            Value::custom(()),
        ];
        let want = [1.0, 2.0, 3.0, 5.0, 6.0, 0.0, 0.0];
        for (input, want) in inputs.iter().zip(want) {
            assert_eq!(input.to_f64_lossy(), want, "input {input:?}");
        }
    }

    #[test]
    fn test_strict_numeric_access_reports_shape() {
        let err = Value::Bool(true).as_f64().unwrap_err();
        assert_eq!(
            err,
            FilterError::TypeMismatch {
                expected: "number",
                found: "bool"
            }
        );
    }
}
