//! evmetrics agent library entry.
//!
//! Wires config, the AMQP consumer, the handler dispatch table and the
//! `/metrics` exposition into one process. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod cli;
pub mod config;
pub mod consumer;
pub mod dispatch;
pub mod handlers;
pub mod obs;
pub mod router;
