//! Per-delivery handling: parse, dispatch, acknowledge.

use std::fmt::Display;
use std::sync::Arc;

use futures_util::{Stream, StreamExt};

use evmetrics_core::error::{EvMetricsError, Result};
use evmetrics_core::RoutingKey;

use crate::consumer::Delivery;
use crate::dispatch::Dispatcher;

/// What happened to one delivery. It was acknowledged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Key parsed and dispatched to `matched` handlers, `failed` of which errored.
    Dispatched { matched: usize, failed: usize },
    /// Key did not split into three segments; nothing counted.
    Malformed,
}

pub struct MessageProcessor {
    dispatcher: Arc<Dispatcher>,
}

impl MessageProcessor {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Handle one delivery to completion and ack it exactly once.
    ///
    /// Malformed keys are poison messages: logged and acked, never requeued.
    /// Only an ack failure is returned as an error.
    pub async fn process<D: Delivery + ?Sized>(&self, delivery: &D) -> Result<Outcome> {
        let raw = delivery.routing_key();
        if delivery.redelivered() {
            tracing::warn!(routing_key = %raw, "redelivered message, may be counted twice");
        }

        let outcome = match RoutingKey::parse(raw) {
            Ok(key) => {
                let report = self.dispatcher.dispatch(&key, delivery.payload()).await;
                Outcome::Dispatched {
                    matched: report.matched,
                    failed: report.failed,
                }
            }
            Err(e) => {
                tracing::error!(routing_key = %raw, error = %e, "dropping malformed message");
                Outcome::Malformed
            }
        };

        delivery.ack().await?;
        Ok(outcome)
    }

    /// Drain `deliveries` one at a time until the stream fails or ends.
    ///
    /// Never returns `Ok`: an ended stream means the broker connection is
    /// gone, which is fatal.
    pub async fn run<S, D, E>(&self, mut deliveries: S) -> Result<()>
    where
        S: Stream<Item = std::result::Result<D, E>> + Unpin,
        D: Delivery,
        E: Display,
    {
        while let Some(next) = deliveries.next().await {
            let delivery =
                next.map_err(|e| EvMetricsError::Broker(format!("consumer failed: {e}")))?;
            self.process(&delivery).await?;
        }
        Err(EvMetricsError::Broker("consumer stream closed".into()))
    }
}
