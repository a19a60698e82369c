//! AMQP subscription setup (lapin).
//!
//! Connect, open a channel with prefetch 1, declare the topic exchange, declare
//! an exclusive non-durable queue with a fresh name, bind it with every
//! dispatcher pattern and start consuming.

use lapin::options::{
    BasicConsumeOptions, BasicQosOptions, ExchangeDeclareOptions, QueueBindOptions,
    QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::uri::{AMQPAuthority, AMQPUri, AMQPUserInfo};
use lapin::{Channel, Connection, ConnectionProperties, Consumer, ExchangeKind};
use uuid::Uuid;

use evmetrics_core::error::{EvMetricsError, Result};

use crate::config::AmqpSection;

/// One delivery in flight at a time.
pub const PREFETCH_COUNT: u16 = 1;

fn broker(what: &str) -> impl FnOnce(lapin::Error) -> EvMetricsError + '_ {
    move |e| EvMetricsError::Broker(format!("{what}: {e}"))
}

/// `<prefix>-<uuid v4>`: restarts never inherit an old backlog.
pub fn unique_queue_name(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

/// Per-channel prefetch (`global: false`).
pub fn qos_options() -> BasicQosOptions {
    BasicQosOptions::default()
}

/// Non-durable topic exchange, created if missing.
pub fn exchange_options() -> ExchangeDeclareOptions {
    ExchangeDeclareOptions::default()
}

/// Exclusive, non-durable, deleted with the connection.
pub fn queue_options() -> QueueDeclareOptions {
    QueueDeclareOptions {
        durable: false,
        exclusive: true,
        auto_delete: true,
        ..Default::default()
    }
}

/// Manual acknowledgment: `no_ack` stays off.
pub fn consume_options() -> BasicConsumeOptions {
    BasicConsumeOptions::default()
}

/// Build the connection URI from typed parts so credentials need no escaping.
pub fn connection_uri(cfg: &AmqpSection) -> AMQPUri {
    let password = cfg
        .password
        .as_ref()
        .map(|p| p.expose().to_string())
        .unwrap_or_default();

    AMQPUri {
        authority: AMQPAuthority {
            userinfo: AMQPUserInfo {
                username: cfg.username.clone(),
                password,
            },
            host: cfg.host.clone(),
            port: cfg.port,
        },
        vhost: cfg.vhost.clone(),
        ..Default::default()
    }
}

/// Live subscription. Dropping it closes the channel and the exclusive queue
/// goes away with the connection.
pub struct AmqpSubscription {
    connection: Connection,
    channel: Channel,
    queue: String,
    consumer: Consumer,
}

impl AmqpSubscription {
    pub async fn connect(cfg: &AmqpSection, bindings: &[String]) -> Result<Self> {
        if bindings.is_empty() {
            return Err(EvMetricsError::Config("no routing bindings registered".into()));
        }

        tracing::info!(url = %cfg.redacted_url(), "establishing AMQP connection");
        let connection = Connection::connect_uri(
            connection_uri(cfg),
            ConnectionProperties::default().with_connection_name("evmetrics".into()),
        )
        .await
        .map_err(broker("connection failed"))?;

        tracing::info!("creating AMQP channel");
        let channel = connection
            .create_channel()
            .await
            .map_err(broker("channel creation failed"))?;
        channel
            .basic_qos(PREFETCH_COUNT, qos_options())
            .await
            .map_err(broker("failed to set QoS"))?;

        tracing::info!(exchange = %cfg.exchange, "declaring topic exchange");
        channel
            .exchange_declare(
                &cfg.exchange,
                ExchangeKind::Topic,
                exchange_options(),
                FieldTable::default(),
            )
            .await
            .map_err(broker("exchange declaration failed"))?;

        let queue = unique_queue_name(&cfg.queue_prefix);
        tracing::info!(queue = %queue, "declaring unique message queue");
        channel
            .queue_declare(
                &queue,
                queue_options(),
                FieldTable::default(),
            )
            .await
            .map_err(broker("queue declaration failed"))?;

        for binding in bindings {
            tracing::info!(queue = %queue, routing_key = %binding, "binding queue");
            channel
                .queue_bind(
                    &queue,
                    &cfg.exchange,
                    binding,
                    QueueBindOptions::default(),
                    FieldTable::default(),
                )
                .await
                .map_err(broker("queue binding failed"))?;
        }

        let consumer = channel
            .basic_consume(
                &queue,
                "",
                consume_options(),
                FieldTable::default(),
            )
            .await
            .map_err(broker("consume failed"))?;
        tracing::info!(queue = %queue, "listening for messages");

        Ok(Self {
            connection,
            channel,
            queue,
            consumer,
        })
    }

    pub fn queue(&self) -> &str {
        &self.queue
    }

    /// Hand the delivery stream to the processor. The connection handles are
    /// returned so the caller keeps them alive for the stream's lifetime.
    pub fn into_parts(self) -> (Consumer, Connection, Channel) {
        (self.consumer, self.connection, self.channel)
    }
}
