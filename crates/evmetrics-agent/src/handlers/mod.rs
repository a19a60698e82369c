//! Built-in event handlers.

pub mod event_counter;

pub use event_counter::EventCounter;
