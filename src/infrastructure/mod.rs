//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`telegram`] - Telegram Bot API reply delivery

pub mod persistence;
pub mod telegram;
