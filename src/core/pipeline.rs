//! # Pipeline: a source, a filter and an observer wired together.
//!
//! [`Pipeline`] is the handle returned once the driving loop is running. It
//! hands out subscriptions and owns the shutdown protocol.
//!
//! ## High-level architecture
//! ```text
//! Pipeline::builder(cfg).with_filter(f).spawn(source)
//!
//!   tokio::spawn(drive) ─► loop { source.next() ─► f.check/update ─► observer.notify }
//!
//!   pipeline.subscribe() ─► Subscription (cursor at the current tail)
//!   pipeline.close()     ─► Control::close ─► stop ─► loop exits ─► ack
//!   drop(pipeline)       ─► stop requested, nobody waits
//! ```
//!
//! ## Example
//! ```rust
//! use pipecast::{ChanSource, Chain, OnChange, OnValue, Pipeline, Value};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (tx, source) = ChanSource::channel(16);
//!     let pipeline = Pipeline::new(
//!         Chain::new().then(OnChange::new()).then(OnValue::new(3)),
//!         source,
//!     );
//!
//!     let mut sub = pipeline.subscribe();
//!     for v in [1, 1, 2, 3, 3, 4] {
//!         tx.send(Value::from(v)).await?;
//!     }
//!
//!     assert_eq!(sub.recv().await, Value::Int(3));
//!     pipeline.close().await?;
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use super::{builder::PipelineBuilder, config::PipelineConfig, runner::LoopExit};
use crate::error::PipelineError;
use crate::filters::Filter;
use crate::observer::{Observer, Subscription};
use crate::sources::Source;

/// Handle to a running pipeline.
///
/// The driving loop is the only producer. The handle exposes subscriptions
/// and lifecycle, never the publishing side:
///
/// ```compile_fail
/// fn publish_behind_the_loop(pipeline: &pipecast::Pipeline) {
///     pipeline.observer().notify(pipecast::Value::Int(1));
/// }
/// ```
pub struct Pipeline {
    cfg: PipelineConfig,
    observer: Arc<Observer>,
}

impl Pipeline {
    /// Spawns a pipeline with the default configuration.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime.
    pub fn new<F: Filter, S: Source>(filter: F, source: S) -> Self {
        Self::builder(PipelineConfig::default())
            .with_filter(filter)
            .spawn(source)
    }

    /// Returns a builder for a pipeline with the given configuration.
    pub fn builder(cfg: PipelineConfig) -> PipelineBuilder {
        PipelineBuilder::new(cfg)
    }

    pub(crate) fn from_parts(cfg: PipelineConfig, observer: Arc<Observer>) -> Self {
        Self { cfg, observer }
    }

    /// Returns a cursor that will see every value published from now on.
    pub fn subscribe(&self) -> Subscription {
        self.observer.subscribe()
    }

    /// Stops the driving loop and waits for its acknowledgement.
    ///
    /// - The first call returns `Ok(())`, immediately if the loop already exited.
    /// - Later or concurrent calls return [`PipelineError::AlreadyClosed`].
    /// - Waiting longer than the configured grace returns
    ///   [`PipelineError::GraceExceeded`].
    pub async fn close(&self) -> Result<(), PipelineError> {
        self.observer.close().await
    }

    /// True once the driving loop has exited, for whatever reason.
    pub fn is_stopped(&self) -> bool {
        self.observer.control().is_stopped()
    }

    /// Number of values published so far.
    pub fn published(&self) -> u64 {
        self.observer.published()
    }

    /// Why the driving loop exited, or `None` while it is still running.
    ///
    /// After a successful [`close`](Self::close) this is
    /// [`LoopExit::Stopped`] unless the loop had already ended on its own.
    pub fn exit(&self) -> Option<LoopExit> {
        self.observer.control().exit().cloned()
    }

    /// Configuration this pipeline was built with.
    pub fn config(&self) -> &PipelineConfig {
        &self.cfg
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.cfg.name)
            .field("observer", &self.observer)
            .finish()
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        self.observer.control().request_stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::Pass;
    use crate::sources::ChanSource;
    use crate::value::Value;
    use std::time::Duration;

    #[tokio::test]
    async fn test_drop_requests_stop() {
        let (_tx, source) = ChanSource::channel(1);
        let pipeline = Pipeline::new(Pass, source);
        let observer = Arc::clone(&pipeline.observer);

        drop(pipeline);
        tokio::time::timeout(Duration::from_secs(2), async {
            while !observer.control().is_stopped() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("loop exits after drop");
    }

    #[tokio::test]
    async fn test_builder_defaults_to_pass() {
        let (tx, source) = ChanSource::channel(1);
        let pipeline = Pipeline::builder(PipelineConfig::named("raw")).spawn(source);
        assert_eq!(pipeline.config().name, "raw");

        let mut sub = pipeline.subscribe();
        tx.send(Value::from("x")).await.unwrap();
        assert_eq!(
            sub.recv_timeout(Duration::from_secs(2)).await,
            Ok(Value::from("x"))
        );
        pipeline.close().await.unwrap();
        assert_eq!(pipeline.exit(), Some(LoopExit::Stopped));
    }
}
