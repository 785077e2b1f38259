//! # Function-backed source (`FuncSource`)
//!
//! [`FuncSource`] calls a closure once per `refresh` period and yields its
//! result. The first call happens one period after the loop starts.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use pipecast::{FuncSource, Source, Value};
//!
//! let mut n = 0;
//! let src = FuncSource::new(Duration::from_millis(500), move || {
//!     n += 1;
//!     Value::Int(n)
//! })
//! .with_name("counter");
//!
//! assert_eq!(src.name(), "counter");
//! ```

use std::borrow::Cow;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{self, Interval, MissedTickBehavior};

use crate::core::{MIN_REFRESH, PipelineConfig};
use crate::sources::Source;
use crate::value::Value;

/// Periodically polled closure.
pub struct FuncSource<F> {
    name: Cow<'static, str>,
    f: F,
    refresh: Duration,
    ticker: Option<Interval>,
}

impl<F> FuncSource<F>
where
    F: FnMut() -> Value + Send + 'static,
{
    /// Creates a source calling `f` every `refresh` (clamped to [`MIN_REFRESH`]).
    pub fn new(refresh: Duration, f: F) -> Self {
        Self {
            name: Cow::Borrowed("func"),
            f,
            refresh: refresh.max(MIN_REFRESH),
            ticker: None,
        }
    }

    /// Creates a source using the config's refresh period.
    pub fn from_config(cfg: &PipelineConfig, f: F) -> Self {
        Self::new(cfg.refresh_period(), f)
    }

    /// Sets the name used in logs.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Poll period.
    pub fn refresh(&self) -> Duration {
        self.refresh
    }
}

#[async_trait]
impl<F> Source for FuncSource<F>
where
    F: FnMut() -> Value + Send + 'static,
{
    async fn next(&mut self) -> Option<Value> {
        let refresh = self.refresh;
        let ticker = self.ticker.get_or_insert_with(|| {
            let mut t = time::interval_at(time::Instant::now() + refresh, refresh);
            t.set_missed_tick_behavior(MissedTickBehavior::Delay);
            t
        });
        ticker.tick().await;
        Some((self.f)())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
