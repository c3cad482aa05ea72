//! Livechat / omnichannel service (`livechat/...`).
//!
//! Unlike the dotted method paths elsewhere, livechat endpoints are REST
//! style: the department id, SMS service and user type are path segments.

mod requests;
mod service;

pub use requests::*;
pub use service::*;
