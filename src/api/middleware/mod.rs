//! HTTP middleware for request processing and protection.
//!
//! Provides webhook secret verification, rate limiting, and observability middleware.

pub mod rate_limit;
pub mod tracing;
pub mod webhook_secret;
