//! Topic routing (keys + binding patterns).
//!
//! - `RoutingKey`: a concrete `<service>.<object_type>.<action>` key as
//!   delivered by the broker.
//! - `RoutingPattern`: a three-segment binding where `*` matches exactly one
//!   segment, resolved against keys at dispatch time.
//!
//! Both parsers walk `str::split` iterators and never index, so malformed
//! input is always reported as `EvMetricsError`.

pub mod key;
pub mod pattern;

pub use key::RoutingKey;
pub use pattern::{RoutingPattern, Segment};

/// Separator between routing key segments.
pub const SEPARATOR: char = '.';

/// Number of segments in every key and pattern.
pub const SEGMENTS: usize = 3;
