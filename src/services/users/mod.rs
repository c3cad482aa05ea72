//! Users service (`login`, `logout`, `me`, `users.*`).

mod requests;
mod service;

pub use requests::*;
pub use service::*;
