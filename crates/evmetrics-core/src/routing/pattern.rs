//! Binding patterns with single-segment wildcards.
//!
//! Only `*` is supported. AMQP's `#` (zero or more segments) is rejected since
//! every key this system accepts has exactly three segments.

use std::fmt;
use std::str::FromStr;

use crate::error::{EvMetricsError, Result};
use crate::routing::{RoutingKey, SEGMENTS, SEPARATOR};

/// One pattern segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// `*`: matches any single segment.
    Any,
    /// Matches only this exact value.
    Exact(String),
}

impl Segment {
    fn parse(raw: &str) -> std::result::Result<Self, String> {
        match raw {
            "*" => Ok(Segment::Any),
            "" => Err("empty segment".into()),
            s if s.contains('#') || s.contains('*') => {
                Err(format!("unsupported wildcard in segment {s:?}"))
            }
            s => Ok(Segment::Exact(s.to_string())),
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Segment::Any => true,
            Segment::Exact(v) => v == value,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Any => f.write_str("*"),
            Segment::Exact(v) => f.write_str(v),
        }
    }
}

/// A `(service, object_type, action)` pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutingPattern {
    pub service: Segment,
    pub object_type: Segment,
    pub action: Segment,
}

impl RoutingPattern {
    /// `*.*.*`: every three-segment key.
    pub fn any() -> Self {
        Self {
            service: Segment::Any,
            object_type: Segment::Any,
            action: Segment::Any,
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason: String| EvMetricsError::InvalidPattern {
            pattern: raw.to_string(),
            reason,
        };

        let segments: Vec<&str> = raw.split(SEPARATOR).collect();
        let [service, object_type, action] = segments.as_slice() else {
            return Err(invalid(format!(
                "expected {SEGMENTS} segments, got {}",
                segments.len()
            )));
        };

        Ok(Self {
            service: Segment::parse(service).map_err(invalid)?,
            object_type: Segment::parse(object_type).map_err(invalid)?,
            action: Segment::parse(action).map_err(invalid)?,
        })
    }

    pub fn matches(&self, key: &RoutingKey) -> bool {
        self.service.matches(&key.service)
            && self.object_type.matches(&key.object_type)
            && self.action.matches(&key.action)
    }

    /// Binding key handed to `queue.bind`.
    pub fn binding_key(&self) -> String {
        self.to_string()
    }
}

impl FromStr for RoutingPattern {
    type Err = EvMetricsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RoutingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.service, self.object_type, self.action)
    }
}
