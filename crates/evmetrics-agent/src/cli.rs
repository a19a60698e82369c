//! Command-line flags.
//!
//! Every broker flag can also be given as an `AMQP_`-prefixed environment
//! variable. Precedence: flag > environment > config file > default.

use std::path::PathBuf;

use clap::Parser;

use evmetrics_core::error::Result;

use crate::config::{self, AgentConfig, Secret};

/// Count AMQP topic events by routing key and expose them to Prometheus.
#[derive(Debug, Parser)]
#[command(name = "evmetrics")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional YAML config file.
    #[arg(short, long, env = "AMQP_CONFIG")]
    pub config: Option<PathBuf>,

    /// AMQP host [default: localhost]
    #[arg(long, env = "AMQP_HOST")]
    pub host: Option<String>,

    /// AMQP port [default: 5672]
    #[arg(long, env = "AMQP_PORT")]
    pub port: Option<u16>,

    /// AMQP username [default: guest]
    #[arg(long, env = "AMQP_USERNAME")]
    pub username: Option<String>,

    /// AMQP password
    #[arg(long, env = "AMQP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// AMQP exchange [default: events]
    #[arg(long, env = "AMQP_EXCHANGE")]
    pub exchange: Option<String>,

    /// AMQP virtual host [default: /]
    #[arg(long, env = "AMQP_VHOST")]
    pub vhost: Option<String>,

    /// Prefix of the per-process queue name [default: evmetrics-consumer]
    #[arg(long, env = "AMQP_QUEUE_PREFIX")]
    pub queue_prefix: Option<String>,

    /// Metrics listen address [default: 0.0.0.0:8000]
    #[arg(long, env = "METRICS_LISTEN")]
    pub metrics_listen: Option<String>,
}

impl Cli {
    /// Load the config file (if any), apply overrides and validate.
    pub fn resolve(self) -> Result<AgentConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from_file(path)?,
            None => AgentConfig::default(),
        };
        self.apply(&mut cfg);
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn apply(self, cfg: &mut AgentConfig) {
        let amqp = &mut cfg.amqp;
        if let Some(v) = self.host {
            amqp.host = v;
        }
        if let Some(v) = self.port {
            amqp.port = v;
        }
        if let Some(v) = self.username {
            amqp.username = v;
        }
        if let Some(v) = self.password {
            amqp.password = Some(Secret::new(v));
        }
        if let Some(v) = self.exchange {
            amqp.exchange = v;
        }
        if let Some(v) = self.vhost {
            amqp.vhost = v;
        }
        if let Some(v) = self.queue_prefix {
            amqp.queue_prefix = v;
        }
        if let Some(v) = self.metrics_listen {
            cfg.metrics.listen = v;
        }
    }
}
