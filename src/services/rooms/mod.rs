//! Rooms service: public channels (`channels.*`) and private groups (`groups.*`).
//!
//! Both endpoint families share parameters and envelopes and differ only in
//! their path prefix and payload keys, so one service serves both.

mod requests;
mod service;

pub use requests::*;
pub use service::*;
