//! Credential codec.
//!
//! Plaintext passwords are turned into bcrypt digests at [`bcrypt::DEFAULT_COST`]
//! with a fresh random salt embedded in each digest. The work factor is fixed
//! here and is not something callers can lower.

use std::sync::LazyLock;

use bcrypt::{DEFAULT_COST, hash, verify};
use thiserror::Error;

/// Digest checked when there is no stored one, so that a lookup miss costs the
/// same bcrypt work as a wrong password.
static DECOY_DIGEST: LazyLock<Option<String>> =
    LazyLock::new(|| hash("bursar-decoy-password", DEFAULT_COST).ok());

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashFailed(#[from] bcrypt::BcryptError),
}

/// Hashes a plaintext password into a self-describing bcrypt digest.
///
/// Hashing the same input twice yields two different digests; both verify.
///
/// # Errors
///
/// Returns [`PasswordError::HashFailed`] if the underlying bcrypt call fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    Ok(hash(password, DEFAULT_COST)?)
}

/// Checks a plaintext password against a stored digest.
///
/// A mismatch is `false`, never an error. A digest that cannot be parsed is
/// treated the same way.
pub fn verify_password(password: &str, digest: &str) -> bool {
    verify(password, digest).unwrap_or(false)
}

/// Like [`verify_password`], but accepts a missing digest.
///
/// With `None` a decoy digest is verified and the result discarded, so the
/// call takes as long as a real mismatch and always returns `false`.
pub fn verify_password_or_decoy(password: &str, digest: Option<&str>) -> bool {
    match digest {
        Some(digest) => verify_password(password, digest),
        None => {
            if let Some(decoy) = DECOY_DIGEST.as_deref() {
                let _ = verify_password(password, decoy);
            }
            false
        }
    }
}
