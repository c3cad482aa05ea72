//! Observability helpers for the Rocket.Chat client.
//!
//! The crate emits `tracing` events and spans only; installing a subscriber
//! is left to the application.

pub mod logging;

pub use logging::*;
