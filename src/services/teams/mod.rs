//! Teams service (`teams.*`).

mod requests;
mod service;

pub use requests::*;
pub use service::*;
