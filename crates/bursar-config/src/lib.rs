//! # Bursar Config
//!
//! Configuration types for the Bursar API.
//!
//! Every structure here is built once at start-up, from environment variables,
//! and then handed explicitly to whatever needs it. Nothing is global.
//!
//! - [`app`]: Deployment environment and listen address
//! - [`jwt`]: Token signing secret and lifetime
//! - [`cors`]: Allowed cross-origin callers
//! - [`database`]: PostgreSQL connection settings
//!
//! # Example
//!
//! ```ignore
//! use bursar_config::{AppEnv, CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
//!
//! let server = ServerConfig::from_env();
//! let jwt_config = JwtConfig::from_env();
//! jwt_config.validate(server.app_env)?;
//! let database = DatabaseConfig::from_env()?;
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod app;
pub mod cors;
pub mod database;
pub mod jwt;

use thiserror::Error;

// Re-export commonly used types at crate root
pub use app::{AppEnv, ServerConfig};
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Reads one variable through `lookup`, treating empty strings as unset.
pub(crate) fn var<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads and parses one variable, falling back to `default` when unset.
pub(crate) fn parsed<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match var(lookup, name) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

pub(crate) fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[cfg(test)]
pub(crate) fn map_lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let owned: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| {
        owned
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }
}
