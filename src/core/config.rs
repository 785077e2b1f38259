//! # Pipeline configuration.
//!
//! Provides [`PipelineConfig`] centralized settings for one pipeline.
//!
//! Config is used in two ways:
//! 1. **Pipeline creation**: `Pipeline::builder(config)`
//! 2. **Source defaults**: `FuncSource::from_config(&config, f)`
//!
//! ## Sentinel values
//! - `grace = 0s` → `close` waits for the loop without limit
//! - `refresh = 0s` → clamped to [`MIN_REFRESH`]

use std::borrow::Cow;
use std::time::Duration;

use crate::policies::FaultPolicy;

/// Smallest poll period a function source will use.
pub const MIN_REFRESH: Duration = Duration::from_millis(1);

/// Configuration for a single pipeline.
///
/// ## Field semantics
/// - `name`: Label attached to the pipeline's log span
/// - `refresh`: Poll period for function-driven sources
/// - `grace`: Maximum wait for the loop to acknowledge `close` (`0s` = no limit)
/// - `fault_policy`: What the loop does when a filter fails
///
/// ## Notes
/// All fields are public. Prefer the helper accessors over sentinel checks.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Name used in logs.
    pub name: Cow<'static, str>,

    /// Poll period for [`FuncSource`](crate::FuncSource) built with `from_config`.
    pub refresh: Duration,

    /// Maximum time `close` waits for the driving loop to acknowledge.
    ///
    /// - `Duration::ZERO` = wait without limit
    /// - `> 0` = return [`PipelineError::GraceExceeded`](crate::PipelineError) after `grace`
    pub grace: Duration,

    /// Reaction to filter faults.
    pub fault_policy: FaultPolicy,
}

impl PipelineConfig {
    /// Returns a config with the given name and defaults elsewhere.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the close grace as an `Option`.
    ///
    /// - `None` → wait without limit
    /// - `Some(d)` → give up after `d`
    #[inline]
    pub fn grace_limit(&self) -> Option<Duration> {
        if self.grace == Duration::ZERO {
            None
        } else {
            Some(self.grace)
        }
    }

    /// Returns the poll period clamped to [`MIN_REFRESH`].
    #[inline]
    pub fn refresh_period(&self) -> Duration {
        self.refresh.max(MIN_REFRESH)
    }
}

impl Default for PipelineConfig {
    /// Default configuration:
    ///
    /// - `name = "pipeline"`
    /// - `refresh = 1s`
    /// - `grace = 5s`
    /// - `fault_policy = FaultPolicy::Reject`
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("pipeline"),
            refresh: Duration::from_secs(1),
            grace: Duration::from_secs(5),
            fault_policy: FaultPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        let mut cfg = PipelineConfig::named("temps");
        assert_eq!(cfg.name, "temps");
        assert_eq!(cfg.grace_limit(), Some(Duration::from_secs(5)));

        cfg.grace = Duration::ZERO;
        cfg.refresh = Duration::ZERO;
        assert_eq!(cfg.grace_limit(), None);
        assert_eq!(cfg.refresh_period(), MIN_REFRESH);
    }
}
