// src/config.rs
use std::env;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    database_max_connections: u32,
    listen_addr: String,
    biscuit_public_key: String,
    allowed_origins: Vec<String>,
    rate_limit_enabled: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

const DEFAULT_MAX_CONNECTIONS: u32 = 16;

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

impl AppConfig {
    /// Build configuration from environment variables, loading a `.env`
    /// file first when one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(default_listen_addr);

        let biscuit_public_key = lookup("BISCUIT_ROOT_PUBLIC_KEY")
            .ok_or(ConfigError::Missing("BISCUIT_ROOT_PUBLIC_KEY"))?
            .trim()
            .to_string();
        if biscuit_public_key.len() != 64
            || !biscuit_public_key.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(ConfigError::Invalid(
                "BISCUIT_ROOT_PUBLIC_KEY must be a 32-byte hex string".into(),
            ));
        }

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let rate_limit_enabled = match lookup("RATE_LIMIT_ENABLED") {
            None => true,
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                ConfigError::Invalid(format!("RATE_LIMIT_ENABLED is not a boolean: {raw}"))
            })?,
        };

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    ConfigError::Invalid(format!(
                        "DATABASE_MAX_CONNECTIONS must be a positive integer: {raw}"
                    ))
                })?,
        };

        Ok(Self {
            database_url,
            database_max_connections,
            listen_addr,
            biscuit_public_key,
            allowed_origins,
            rate_limit_enabled,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn biscuit_public_key(&self) -> &str {
        &self.biscuit_public_key
    }

    /// Empty when any origin may call the API.
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn rate_limit_enabled(&self) -> bool {
        self.rate_limit_enabled
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
