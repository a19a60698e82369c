//! Shared error type across evmetrics crates.

use thiserror::Error;

/// Coarse error classes, used to pick log levels and exit paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A single message could not be interpreted. Never fatal.
    Message,
    /// Startup configuration is invalid.
    Config,
    /// Broker connection or channel failure. Fatal.
    Broker,
    /// Local I/O, e.g. binding the metrics listener. Fatal.
    Io,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// String representation used in structured log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Message => "MESSAGE",
            ErrorKind::Config => "CONFIG",
            ErrorKind::Broker => "BROKER",
            ErrorKind::Io => "IO",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, EvMetricsError>;

/// Unified error type used by core and agent.
#[derive(Debug, Error)]
pub enum EvMetricsError {
    #[error("malformed routing key {key:?}: {reason}")]
    MalformedRoutingKey { key: String, reason: String },
    #[error("invalid routing pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("handler {handler} failed: {reason}")]
    Handler { handler: &'static str, reason: String },
    #[error("config: {0}")]
    Config(String),
    #[error("broker: {0}")]
    Broker(String),
    #[error("io: {0}")]
    Io(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl EvMetricsError {
    /// Map the error to its coarse class.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvMetricsError::MalformedRoutingKey { .. } => ErrorKind::Message,
            EvMetricsError::Handler { .. } => ErrorKind::Message,
            EvMetricsError::InvalidPattern { .. } => ErrorKind::Config,
            EvMetricsError::Config(_) => ErrorKind::Config,
            EvMetricsError::Broker(_) => ErrorKind::Broker,
            EvMetricsError::Io(_) => ErrorKind::Io,
            EvMetricsError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Per-message errors are contained; everything else ends the process.
    pub fn is_fatal(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Message)
    }
}
