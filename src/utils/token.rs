//! Raw token generation and hashing.
//!
//! Raw tokens are 128 random bits rendered as a hyphenated UUID, which only
//! contains `[0-9a-f-]` and therefore needs no escaping inside a query string.
//! Only the SHA-256 digest is ever stored.

use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Builder;

/// Generates a new random raw token.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    Builder::from_random_bytes(bytes)
        .into_uuid()
        .hyphenated()
        .to_string()
}

/// Hashes a raw token with SHA-256.
///
/// Returns a 64-character lowercase hex string.
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
