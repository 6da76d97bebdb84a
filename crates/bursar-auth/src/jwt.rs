//! Access token issuing and verification.
//!
//! Tokens are signed with HS256 using [`JwtConfig::secret`] and live for
//! [`JwtConfig::expiry_minutes`]. Every call to [`issue_token`] mints a new
//! token; nothing is cached per account.
//!
//! Verification order is fixed: structure and signature first, expiry
//! second. A forged token therefore reports [`TokenError::Invalid`] even if
//! its `exp` is in the past.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use bursar_config::JwtConfig;

use crate::claims::Claims;

/// Error type for token operations.
///
/// Messages never include the token, the secret, or raw claim values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Failed to encode token: {0}")]
    Encoding(String),
}

/// Issues an access token for `account_id`, expiring `expiry_minutes` from now.
///
/// # Errors
///
/// Returns [`TokenError::Encoding`] if signing fails.
///
/// # Example
///
/// ```ignore
/// let token = issue_token(account.id, &state.jwt_config)?;
/// ```
pub fn issue_token(account_id: i64, jwt_config: &JwtConfig) -> Result<String, TokenError> {
    issue_token_at(account_id, Utc::now(), jwt_config)
}

/// Issues an access token as if the current time were `now`.
pub fn issue_token_at(
    account_id: i64,
    now: DateTime<Utc>,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    let exp = Duration::try_minutes(jwt_config.expiry_minutes)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| TokenError::Encoding("token lifetime is out of range".to_string()))?;

    let claims = Claims {
        sub: account_id.to_string(),
        exp: exp.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Verifies an access token and returns its claims.
///
/// # Errors
///
/// - [`TokenError::Invalid`] if the token is malformed, signed with another
///   key or algorithm, or lacks `sub`/`exp`
/// - [`TokenError::Expired`] if the signature is good but `exp` has passed
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    verify_token_at(token, Utc::now(), jwt_config)
}

/// Verifies an access token as if the current time were `now`.
pub fn verify_token_at(
    token: &str,
    now: DateTime<Utc>,
    jwt_config: &JwtConfig,
) -> Result<Claims, TokenError> {
    // Expiry is checked below against `now` so the clock can be injected.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| TokenError::Invalid(e.to_string()))?;

    if claims.exp <= now.timestamp() {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}
