//! Server configuration from the environment.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

/// Shared secret used when `ALLOW_DEFAULT_API_KEY` is set and no key is configured.
pub const DEFAULT_DEV_API_KEY: &str = "analytics-dev-key";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8001;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("AI_SERVICE_API_KEY is not set (set ALLOW_DEFAULT_API_KEY=1 for local development)")]
    MissingApiKey,

    #[error("PORT must be a valid port number, got '{0}'")]
    InvalidPort(String),

    #[error("Invalid HOST:PORT configuration '{0}'")]
    InvalidAddress(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_key: String,
}

impl ServerConfig {
    /// Read `HOST`, `PORT` and `AI_SERVICE_API_KEY` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let api_key = match get("AI_SERVICE_API_KEY") {
            Some(key) => key,
            None if get("ALLOW_DEFAULT_API_KEY").is_some_and(|v| is_truthy(&v)) => {
                tracing::warn!("AI_SERVICE_API_KEY not set, using the development default");
                DEFAULT_DEV_API_KEY.to_string()
            }
            None => return Err(ConfigError::MissingApiKey),
        };

        Ok(Self {
            host,
            port,
            api_key,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
