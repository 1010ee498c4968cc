//! Users module: self-service profile and admin account management

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
