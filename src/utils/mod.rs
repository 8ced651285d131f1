//! Helper functions shared across layers.
//!
//! - [`token`] - Raw token generation and SHA-256 hashing
//! - [`db_error`] - Classification of database errors

pub mod db_error;
pub mod token;
