//! Business logic services for the application layer.

pub mod start_service;
pub mod token_service;

pub use start_service::StartService;
pub use token_service::{CALLBACK_PATH, IssuedToken, TokenService};
