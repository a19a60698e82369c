use std::fmt;
use std::net::SocketAddr;

use evmetrics_core::error::{EvMetricsError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    pub version: u32,

    #[serde(default)]
    pub amqp: AmqpSection,

    #[serde(default)]
    pub metrics: MetricsSection,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            version: 1,
            amqp: AmqpSection::default(),
            metrics: MetricsSection::default(),
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(EvMetricsError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.amqp.validate()?;
        self.metrics.validate()?;

        Ok(())
    }
}

/// Password wrapper that never prints its contents.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(xxxxx)")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AmqpSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_username")]
    pub username: String,

    /// Required, but may arrive from the command line or environment.
    #[serde(default)]
    pub password: Option<Secret>,

    #[serde(default = "default_exchange")]
    pub exchange: String,

    #[serde(default = "default_vhost")]
    pub vhost: String,

    #[serde(default = "default_queue_prefix")]
    pub queue_prefix: String,
}

impl Default for AmqpSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: default_username(),
            password: None,
            exchange: default_exchange(),
            vhost: default_vhost(),
            queue_prefix: default_queue_prefix(),
        }
    }
}

impl AmqpSection {
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(EvMetricsError::Config("amqp.host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(EvMetricsError::Config("amqp.port must not be 0".into()));
        }
        if self.username.is_empty() {
            return Err(EvMetricsError::Config("amqp.username must not be empty".into()));
        }
        if self.password.is_none() {
            return Err(EvMetricsError::Config(
                "amqp.password is required (--password or AMQP_PASSWORD)".into(),
            ));
        }
        if self.exchange.is_empty() {
            return Err(EvMetricsError::Config("amqp.exchange must not be empty".into()));
        }
        if self.queue_prefix.is_empty() {
            return Err(EvMetricsError::Config(
                "amqp.queue_prefix must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Connection URL safe for logs.
    pub fn redacted_url(&self) -> String {
        let vhost = if self.vhost == "/" { "" } else { self.vhost.as_str() };
        format!(
            "amqp://{}:xxxxx@{}:{}/{}",
            self.username, self.host, self.port, vhost
        )
    }
}

fn default_host() -> String {
    "localhost".into()
}
fn default_port() -> u16 {
    5672
}
fn default_username() -> String {
    "guest".into()
}
fn default_exchange() -> String {
    "events".into()
}
fn default_vhost() -> String {
    "/".into()
}
fn default_queue_prefix() -> String {
    "evmetrics-consumer".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            EvMetricsError::Config(format!("metrics.listen {:?} is invalid: {e}", self.listen))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}
