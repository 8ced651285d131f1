//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`AuthTokenRepository`] - Single-use sign-in token storage
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod auth_token_repository;

pub use auth_token_repository::AuthTokenRepository;

#[cfg(test)]
pub use auth_token_repository::MockAuthTokenRepository;
