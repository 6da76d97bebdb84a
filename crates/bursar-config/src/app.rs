//! Deployment environment and listen address.
//!
//! - `APP_ENV`: `dev` (default), `test`, or `production`
//! - `HOST`: bind address (default `0.0.0.0`)
//! - `PORT`: bind port (default `3000`)

use std::fmt;
use std::str::FromStr;

use crate::{ConfigError, env_lookup, parsed, var};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppEnv {
    #[default]
    Dev,
    Test,
    Production,
}

impl AppEnv {
    pub fn is_production(self) -> bool {
        matches!(self, AppEnv::Production)
    }
}

impl FromStr for AppEnv {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dev" | "development" | "local" => Ok(AppEnv::Dev),
            "test" | "testing" => Ok(AppEnv::Test),
            "prod" | "production" => Ok(AppEnv::Production),
            other => Err(format!("unknown environment `{other}`")),
        }
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AppEnv::Dev => "dev",
            AppEnv::Test => "test",
            AppEnv::Production => "production",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub app_env: AppEnv,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            app_env: parsed(&lookup, "APP_ENV", AppEnv::Dev)?,
            host: var(&lookup, "HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&lookup, "PORT", 3000)?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
