//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Auth tokens and chat identities
//! - [`repositories`] - Data access trait definitions
//! - [`start_command`] - `/start` deep-link recognition
//! - [`reply`] - Replies sent back to the chat user
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business flows live in [`crate::application::services`].
//!
//! # Sign-in Flow
//!
//! 1. The website opens `t.me/<bot>?start=web_auth`
//! 2. The bot platform delivers `/start web_auth` to the webhook
//! 3. A token is generated, its hash stored with a 5 minute expiry
//! 4. The user receives a [`reply::ReplyAction`] with the redemption link
//! 5. The website redeems the raw token exactly once

pub mod entities;
pub mod reply;
pub mod repositories;
pub mod start_command;
