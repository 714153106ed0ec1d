//! Session token generation and hashing.
//!
//! ARCHITECTURE
//! ============
//! The client holds a random 32-byte hex token in an HttpOnly cookie. The
//! store is keyed by the SHA-256 of that token, so every lookup hashes the
//! cookie value first.

use rand::Rng;
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}

/// Hex SHA-256 of a session token. This is what the store persists.
#[must_use]
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Expiry instant for a session created now.
#[must_use]
pub fn expires_at(ttl: time::Duration) -> OffsetDateTime {
    OffsetDateTime::now_utc() + ttl
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
