//! Chat message service (`chat.*`).

mod requests;
mod service;

pub use requests::*;
pub use service::*;
