//! Settings service (`settings/{id}`).

mod service;

pub use service::*;
