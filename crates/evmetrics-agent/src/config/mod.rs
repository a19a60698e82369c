//! Agent config loader (strict parsing).
//!
//! The YAML file is optional; command-line flags and `AMQP_*` environment
//! variables override it (see `cli`). Validation runs once all layers are
//! applied.

pub mod schema;

use std::fs;
use std::path::Path;

use evmetrics_core::error::{EvMetricsError, Result};

pub use schema::{AgentConfig, AmqpSection, MetricsSection, Secret};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<AgentConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        EvMetricsError::Config(format!("read config {} failed: {e}", path.display()))
    })?;
    parse_str(&s)
}

/// Parse without validating: a password may still come from the environment.
pub fn parse_str(s: &str) -> Result<AgentConfig> {
    serde_yaml::from_str(s).map_err(|e| EvMetricsError::Config(format!("invalid yaml: {e}")))
}

pub fn load_from_str(s: &str) -> Result<AgentConfig> {
    let cfg = parse_str(s)?;
    cfg.validate()?;
    Ok(cfg)
}
