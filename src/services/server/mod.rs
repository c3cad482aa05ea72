//! Server information (`/api/info`).
//!
//! This endpoint sits beside the versioned API root, so requests go to an
//! absolute URL built from the instance address.

mod responses;
mod service;

pub use responses::*;
pub use service::*;
