//! Token signing configuration.
//!
//! - `JWT_SECRET_KEY`: HMAC secret (default empty, rejected in production)
//! - `JWT_EXPIRATION_MINUTES`: access token lifetime in minutes (default 30)

use std::fmt;

use crate::{AppEnv, ConfigError, env_lookup, parsed, var};

pub const DEFAULT_EXPIRY_MINUTES: i64 = 30;

/// Longest accepted token lifetime: one year.
pub const MAX_EXPIRY_MINUTES: i64 = 60 * 24 * 365;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_minutes: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiry_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            expiry_minutes,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            secret: var(&lookup, "JWT_SECRET_KEY").unwrap_or_default(),
            expiry_minutes: parsed(&lookup, "JWT_EXPIRATION_MINUTES", DEFAULT_EXPIRY_MINUTES)?,
        })
    }

    /// Rejects settings that would make tokens forgeable or useless.
    ///
    /// An empty secret is tolerated outside production so a fresh checkout runs
    /// without setup.
    pub fn validate(&self, app_env: AppEnv) -> Result<(), ConfigError> {
        if self.secret.is_empty() && app_env.is_production() {
            return Err(ConfigError::Missing("JWT_SECRET_KEY"));
        }
        if self.expiry_minutes <= 0 {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRATION_MINUTES",
                reason: "must be a positive number of minutes".to_string(),
            });
        }
        if self.expiry_minutes > MAX_EXPIRY_MINUTES {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRATION_MINUTES",
                reason: format!("must be at most {MAX_EXPIRY_MINUTES} minutes"),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[redacted]")
            .field("expiry_minutes", &self.expiry_minutes)
            .finish()
    }
}
