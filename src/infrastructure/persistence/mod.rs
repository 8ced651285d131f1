//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgAuthTokenRepository`] - Auth token storage, consumption and cleanup

pub mod pg_auth_token_repository;

pub use pg_auth_token_repository::PgAuthTokenRepository;
