//! Integrations service (`integrations.*`).

mod service;

pub use service::*;
