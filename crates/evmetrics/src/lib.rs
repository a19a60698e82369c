//! Top-level facade crate for evmetrics.
//!
//! Re-exports core types and the agent library so users can depend on a single crate.

pub mod core {
    pub use evmetrics_core::*;
}

pub mod agent {
    pub use evmetrics_agent::*;
}
