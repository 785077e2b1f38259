use std::sync::Arc;

use tracing::Instrument;

use super::{config::PipelineConfig, control::Control, pipeline::Pipeline, runner};
use crate::{
    filters::{Filter, Pass},
    observer::Observer,
    sources::Source,
};

/// Builder for constructing a [`Pipeline`] with optional settings.
pub struct PipelineBuilder {
    cfg: PipelineConfig,
    filter: Box<dyn Filter>,
}

impl PipelineBuilder {
    /// Creates a new builder with the given configuration.
    ///
    /// Without [`with_filter`](Self::with_filter) every raw value is published.
    pub fn new(cfg: PipelineConfig) -> Self {
        Self {
            cfg,
            filter: Box::new(Pass),
        }
    }

    /// Sets the decision unit (a single filter or a composite).
    pub fn with_filter(mut self, filter: impl Filter) -> Self {
        self.filter = Box::new(filter);
        self
    }

    /// Configuration the pipeline will be built with.
    pub fn config(&self) -> &PipelineConfig {
        &self.cfg
    }

    /// Spawns the driving loop over `source` and returns the pipeline handle.
    ///
    /// This consumes the builder and wires:
    /// - the lifecycle controller (stop/ack pair)
    /// - the observer holding the published-state chain
    /// - the driving loop task, inside a `pipeline` log span
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime.
    pub fn spawn<S: Source>(self, source: S) -> Pipeline {
        let (control, token) = Control::pair(self.cfg.grace_limit());
        let observer = Arc::new(Observer::with_control(control));

        let span = tracing::info_span!("pipeline", name = %self.cfg.name);
        let task = runner::drive(
            source,
            self.filter,
            Arc::clone(&observer),
            token,
            self.cfg.fault_policy,
        );
        tokio::spawn(task.instrument(span));

        Pipeline::from_parts(self.cfg, observer)
    }
}
