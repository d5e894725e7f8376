//! One-way password digests.
//!
//! Passwords are stored as the lowercase hex SHA-256 of their UTF-8 bytes.
//! The digest is deterministic so a login can be checked by recomputing it;
//! the plaintext is never stored.

use sha2::{Digest, Sha256};

/// Hash a plaintext password
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Check a plaintext password against a stored digest
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    hash_password(password) == stored_hash
}
