//! Data Transfer Objects for requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod health;
pub mod redeem;
pub mod telegram;
pub mod webhook;
