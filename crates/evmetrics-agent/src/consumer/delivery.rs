//! Broker-neutral view of one delivery.

use async_trait::async_trait;
use lapin::options::BasicAckOptions;

use evmetrics_core::error::{EvMetricsError, Result};

/// One delivered message plus the means to acknowledge it.
#[async_trait]
pub trait Delivery: Send + Sync {
    fn routing_key(&self) -> &str;
    fn payload(&self) -> &[u8];

    /// Broker flagged this as a redelivery (it may already have been counted).
    fn redelivered(&self) -> bool {
        false
    }

    /// Positive acknowledgment. Failure means the channel is gone.
    async fn ack(&self) -> Result<()>;
}

#[async_trait]
impl Delivery for lapin::message::Delivery {
    fn routing_key(&self) -> &str {
        self.routing_key.as_str()
    }

    fn payload(&self) -> &[u8] {
        &self.data
    }

    fn redelivered(&self) -> bool {
        self.redelivered
    }

    async fn ack(&self) -> Result<()> {
        self.acker
            .ack(BasicAckOptions::default())
            .await
            .map(|_| ())
            .map_err(|e| EvMetricsError::Broker(format!("ack failed: {e}")))
    }
}
