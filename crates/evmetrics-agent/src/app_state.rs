//! Shared application state for the agent.
//!
//! Owns the metrics registry and the dispatch table. The consumer path and
//! the HTTP exposition both hold clones of the same `Arc`s.

use std::sync::Arc;

use evmetrics_core::error::Result;
use evmetrics_core::RoutingPattern;

use crate::config::AgentConfig;
use crate::dispatch::Dispatcher;
use crate::handlers::EventCounter;
use crate::obs::EventMetrics;

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<AgentConfig>,
    metrics: Arc<EventMetrics>,
    dispatcher: Arc<Dispatcher>,
}

impl AppState {
    /// Build application state and register the built-in handlers.
    pub fn new(cfg: AgentConfig) -> Result<Self> {
        cfg.validate()?;

        let metrics = Arc::new(EventMetrics::new());
        let dispatcher = Dispatcher::new();

        dispatcher.register(
            RoutingPattern::any(),
            Arc::new(EventCounter::new(Arc::clone(&metrics))),
        );

        Ok(Self {
            cfg: Arc::new(cfg),
            metrics,
            dispatcher: Arc::new(dispatcher),
        })
    }

    pub fn cfg(&self) -> &AgentConfig {
        &self.cfg
    }

    pub fn metrics(&self) -> Arc<EventMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }
}
