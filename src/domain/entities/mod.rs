//! Core domain entities.
//!
//! - [`AuthToken`] - A stored single-use sign-in token
//! - [`ChatIdentity`] - The chat user a token is bound to
//!
//! Creation goes through separate input types: [`NewAuthToken`] for storage
//! and [`SenderProfile`] for unvalidated sender data.

pub mod auth_token;
pub mod identity;

pub use auth_token::{AuthToken, NewAuthToken, TOKEN_TTL_MINUTES, TokenStats, token_ttl};
pub use identity::{ChatIdentity, SenderProfile};
