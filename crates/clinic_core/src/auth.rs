//! crates/clinic_core/src/auth.rs
//!
//! Password digest for the admin authentication gate.
//!
//! The digest is a plain unsalted SHA-256 hex string, so the same password
//! always yields the same digest. That determinism is what lets the store
//! seed the default account and later verify logins against it. The lack of
//! a per-record salt is a documented weakness of the reference system and is
//! carried over deliberately rather than silently changed.

use sha2::{Digest, Sha256};

/// Computes the hex-encoded SHA-256 digest of a password.
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    // Lowercase hex, matching what verification compares against.
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Checks a candidate password against a stored digest.
pub fn verify_password(stored_digest: &str, candidate: &str) -> bool {
    stored_digest == hash_password(candidate)
}
