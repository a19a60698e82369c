//! Lightweight in-process metrics.
//!
//! Counters are stored as atomics in `DashMap` shards and rendered in the
//! Prometheus text exposition format by the `/metrics` handler.

pub mod metrics;

pub use metrics::{CounterVec, EventMetrics, EVENTS_METRIC};
