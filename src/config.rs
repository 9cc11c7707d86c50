// src/config.rs
use thiserror::Error;

pub const BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("REDIS_PORT must be a port number, got {0:?}")]
    InvalidPort(String),
    #[error("{0} must be set")]
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub redis_host: String,
    pub redis_port: u16,
    pub mistral_api_key: String,
}

impl Config {
    /// Load from the process environment, after reading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let redis_host = lookup("REDIS_HOST").unwrap_or_else(|| "localhost".to_string());
        let redis_port = match lookup("REDIS_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 6379,
        };
        let mistral_api_key = lookup("MISTRAL_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::Missing("MISTRAL_API_KEY"))?;
        Ok(Self {
            redis_host,
            redis_port,
            mistral_api_key,
        })
    }
}
