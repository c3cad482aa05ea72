//! Direct message service (`im.*`).

mod service;

pub use service::*;
