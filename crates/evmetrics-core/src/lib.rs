//! evmetrics core: transport-agnostic routing primitives and the shared error type.
//!
//! This crate defines how a topic routing key is split into its
//! `(service, object_type, action)` triple and how binding patterns with `*`
//! wildcards match those triples. It carries no broker or runtime dependencies
//! so the same rules can be exercised directly by tests and tooling.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed routing keys surface as `EvMetricsError`/`Result` so a poison
//! message can never take the consumer down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod routing;

/// Shared result type.
pub use error::{EvMetricsError, Result};
pub use routing::{RoutingKey, RoutingPattern, Segment};
