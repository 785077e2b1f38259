//! Error types used by pipelines and their filters.
//!
//! This module defines two main error enums:
//!
//! - [`FilterError`]: faults raised by a single filter invocation.
//! - [`PipelineError`]: errors raised by the pipeline runtime itself
//!   (shutdown protocol, subscriber waits).
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging.

use std::time::Duration;
use thiserror::Error;

/// # Faults produced by a filter.
///
/// A fault is local to one `check` call: the driving loop never publishes the
/// offending value and, depending on [`FaultPolicy`](crate::FaultPolicy),
/// either keeps running or stops.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// The filter received a value of a shape it cannot process.
    #[error("type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        /// Shape the filter requires.
        expected: &'static str,
        /// Shape that was actually received.
        found: &'static str,
    },

    /// The filter panicked while deciding on a value.
    #[error("filter panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },

    /// User-defined filter failure.
    #[error("filter failed: {error}")]
    Custom {
        /// The underlying error message.
        error: String,
    },
}

impl FilterError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use pipecast::FilterError;
    ///
    /// let err = FilterError::TypeMismatch { expected: "float", found: "str" };
    /// assert_eq!(err.as_label(), "filter_type_mismatch");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            FilterError::TypeMismatch { .. } => "filter_type_mismatch",
            FilterError::Panicked { .. } => "filter_panicked",
            FilterError::Custom { .. } => "filter_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            FilterError::TypeMismatch { expected, found } => {
                format!("expected {expected}, got {found}")
            }
            FilterError::Panicked { info } => format!("panic: {info}"),
            FilterError::Custom { error } => format!("error: {error}"),
        }
    }
}

/// # Errors produced by the pipeline runtime.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// `close` was already called on this pipeline; the loop is stopped.
    #[error("pipeline already closed")]
    AlreadyClosed,

    /// The driving loop did not acknowledge the stop request in time.
    #[error("shutdown grace {grace:?} exceeded; driving loop did not acknowledge")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
    },

    /// A subscriber wait ran out before the next value was published.
    #[error("no value published within {timeout:?}")]
    Timeout {
        /// The timeout that elapsed.
        timeout: Duration,
    },
}

impl PipelineError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use pipecast::PipelineError;
    /// use std::time::Duration;
    ///
    /// let err = PipelineError::GraceExceeded { grace: Duration::from_secs(1) };
    /// assert_eq!(err.as_label(), "pipeline_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            PipelineError::AlreadyClosed => "pipeline_already_closed",
            PipelineError::GraceExceeded { .. } => "pipeline_grace_exceeded",
            PipelineError::Timeout { .. } => "subscriber_timeout",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            PipelineError::AlreadyClosed => "already closed".to_string(),
            PipelineError::GraceExceeded { grace } => format!("grace exceeded after {grace:?}"),
            PipelineError::Timeout { timeout } => format!("timeout: {timeout:?}"),
        }
    }

    /// Indicates whether the error only reports that the work was already done.
    ///
    /// Callers that race several `close` calls can use this to ignore the
    /// losing calls.
    pub fn is_already_closed(&self) -> bool {
        matches!(self, PipelineError::AlreadyClosed)
    }
}
