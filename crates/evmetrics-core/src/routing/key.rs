//! Routing key parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::{EvMetricsError, Result};
use crate::routing::{SEGMENTS, SEPARATOR};

/// A delivered routing key split into its label triple.
///
/// Segments are kept verbatim: no trimming, no case folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutingKey {
    /// Emitting service (first segment).
    pub service: String,
    /// Object type the event concerns (second segment).
    pub object_type: String,
    /// Action performed (third segment).
    pub action: String,
}

impl RoutingKey {
    pub fn new(
        service: impl Into<String>,
        object_type: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            object_type: object_type.into(),
            action: action.into(),
        }
    }

    /// Split `raw` on `.` into exactly three non-empty segments.
    pub fn parse(raw: &str) -> Result<Self> {
        let malformed = |reason: String| EvMetricsError::MalformedRoutingKey {
            key: raw.to_string(),
            reason,
        };

        let segments: Vec<&str> = raw.split(SEPARATOR).collect();
        let [service, object_type, action] = segments.as_slice() else {
            return Err(malformed(format!(
                "expected {SEGMENTS} segments, got {}",
                segments.len()
            )));
        };

        for (name, value) in [
            ("service", service),
            ("object_type", object_type),
            ("action", action),
        ] {
            if value.is_empty() {
                return Err(malformed(format!("empty {name} segment")));
            }
        }

        Ok(Self::new(*service, *object_type, *action))
    }

    /// Label values in exposition order: service, object_type, action.
    pub fn labels(&self) -> [&str; SEGMENTS] {
        [self.service.as_str(), self.object_type.as_str(), self.action.as_str()]
    }
}

impl FromStr for RoutingKey {
    type Err = EvMetricsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RoutingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.service, self.object_type, self.action)
    }
}
