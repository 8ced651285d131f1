//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redeem;
pub mod webhook;

pub use health::health_handler;
pub use redeem::redeem_handler;
pub use webhook::{webhook_handler, webhook_preflight_handler};
