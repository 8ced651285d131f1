//! Application layer services implementing business logic.
//!
//! Services consume repository and reply-sender traits and provide a clean
//! API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::token_service::TokenService`] - Token issuance and redemption
//! - [`services::start_service::StartService`] - `/start` deep-link dispatch and reply

pub mod services;
