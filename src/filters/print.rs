//! # Print tap.
//!
//! [`Print`] accepts every value and writes `"{prefix} {value}"` to its writer
//! when the value is published. Useful as a stage inside a [`Chain`](crate::Chain)
//! to watch intermediate results.

use std::fmt;
use std::io::Write;

use crate::error::FilterError;
use crate::filters::Filter;
use crate::value::Value;

/// Writes every accepted value, then passes it on unchanged.
///
/// Write failures are logged and otherwise ignored.
pub struct Print {
    writer: Box<dyn Write + Send>,
    prefix: String,
}

impl Print {
    /// Creates a tap writing to `writer`.
    pub fn new(writer: impl Write + Send + 'static, prefix: impl Into<String>) -> Self {
        Self {
            writer: Box::new(writer),
            prefix: prefix.into(),
        }
    }

    /// Creates a tap writing to standard output.
    pub fn stdout(prefix: impl Into<String>) -> Self {
        Self::new(std::io::stdout(), prefix)
    }
}

impl fmt::Debug for Print {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Print")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl Filter for Print {
    fn check(&mut self, _value: &Value) -> Result<bool, FilterError> {
        Ok(true)
    }

    fn update(&mut self, value: Value) -> Value {
        if let Err(e) = writeln!(self.writer, "{} {}", self.prefix, value) {
            tracing::warn!(prefix = %self.prefix, error = %e, "print filter write failed");
        }
        value
    }
}
