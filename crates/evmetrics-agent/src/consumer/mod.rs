//! Broker consumption path.
//!
//! `amqp` owns the lapin subscription, `processor` turns each delivery into
//! dispatcher calls plus exactly one ack. `Delivery` is the seam between the
//! two so the processor can be driven without a broker.

pub mod amqp;
pub mod delivery;
pub mod processor;

pub use amqp::AmqpSubscription;
pub use delivery::Delivery;
pub use processor::{MessageProcessor, Outcome};
