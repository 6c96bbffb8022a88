//! Server configuration from environment variables (after `.env` is loaded by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// `DATABASE_URL`
    pub database_url: String,
    /// `BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// `DB_MAX_CONNECTIONS`
    pub max_connections: u32,
    /// `MAX_BODY_BYTES`
    pub max_body_bytes: usize,
    /// `QUIZ_SEED`; unset means entropy.
    pub quiz_seed: Option<u64>,
    /// `TRIVIA_SEED_CATEGORIES`
    pub seed_categories: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/trivia".into(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            max_connections: 5,
            max_body_bytes: 64 * 1024,
            quiz_seed: None,
            seed_categories: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: parse_or(get("BIND_ADDR"), "BIND_ADDR", defaults.bind_addr)?,
            max_connections: parse_or(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", defaults.max_connections)?,
            max_body_bytes: parse_or(get("MAX_BODY_BYTES"), "MAX_BODY_BYTES", defaults.max_body_bytes)?,
            quiz_seed: get("QUIZ_SEED")
                .map(|v| parse_value("QUIZ_SEED", v))
                .transpose()?,
            seed_categories: get("TRIVIA_SEED_CATEGORIES")
                .map(|v| parse_flag("TRIVIA_SEED_CATEGORIES", v))
                .transpose()?
                .unwrap_or(defaults.seed_categories),
        })
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid { key, value })
}

fn parse_or<T: FromStr>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    value.map(|v| parse_value(key, v)).transpose().map(|v| v.unwrap_or(default))
}

fn parse_flag(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value }),
    }
}
