//! Password hashing and verification using Argon2id
//!
//! The stored secret is a salted PHC string; equal plaintexts yield
//! different secrets. Verification never fails on malformed input beyond
//! signaling a mismatch.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    HashingFailed(String),
}

/// Hash a plaintext password with a fresh random salt.
///
/// The returned PHC string embeds algorithm, parameters, and salt, so it
/// is stored as-is in place of the plaintext.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored secret.
///
/// Returns true iff the secret was produced from this plaintext. A
/// malformed or foreign-format secret yields false, not an error.
pub fn verify_password(password: &str, secret: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(secret) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
