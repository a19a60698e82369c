use std::sync::Arc;

use async_trait::async_trait;

use evmetrics_core::error::Result;
use evmetrics_core::RoutingKey;

use crate::dispatch::EventHandler;
use crate::obs::EventMetrics;

/// Counts every matched event under its `(service, object_type, action)` labels.
pub struct EventCounter {
    metrics: Arc<EventMetrics>,
}

impl EventCounter {
    pub fn new(metrics: Arc<EventMetrics>) -> Self {
        Self { metrics }
    }
}

#[async_trait]
impl EventHandler for EventCounter {
    fn name(&self) -> &'static str {
        "event_counter"
    }

    async fn handle(&self, key: &RoutingKey, payload: &[u8]) -> Result<()> {
        tracing::info!(
            service = %key.service,
            object_type = %key.object_type,
            action = %key.action,
            payload_bytes = payload.len(),
            "message received"
        );
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!(routing_key = %key, payload = %payload_preview(payload), "payload");
        }

        self.metrics.observe(key);
        Ok(())
    }
}

const PREVIEW_LIMIT: usize = 512;

/// Lossy UTF-8 of the raw body, cut at `PREVIEW_LIMIT` bytes.
fn payload_preview(payload: &[u8]) -> String {
    let text = String::from_utf8_lossy(payload).into_owned();
    if text.len() <= PREVIEW_LIMIT {
        return text;
    }
    let mut cut = PREVIEW_LIMIT;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &text[..cut])
}
