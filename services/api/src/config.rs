//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Where the persistence documents live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    /// One JSON file per key under `data_dir`.
    File,
    /// Process memory; nothing survives a restart.
    Memory,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub data_dir: PathBuf,
    pub storage_backend: StorageBackend,
    pub cors_origin: String,
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub groq_model: String,
    pub groq_max_tokens: u32,
    pub groq_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str =
            lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin =
            lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:5173".to_string());

        // --- Storage Settings ---
        let data_dir = lookup("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data"));

        let storage_backend = match lookup("STORAGE_BACKEND")
            .unwrap_or_else(|| "file".to_string())
            .to_lowercase()
            .as_str()
        {
            "file" => StorageBackend::File,
            "memory" => StorageBackend::Memory,
            other => {
                return Err(ConfigError::InvalidValue(
                    "STORAGE_BACKEND".to_string(),
                    format!("'{}' is not one of: file, memory", other),
                ))
            }
        };

        // --- Remote Generation Settings ---
        // The key is optional: without it the remote path reports a configuration error.
        let groq_api_key = lookup("GROQ_API_KEY").filter(|key| !key.trim().is_empty());
        let groq_base_url = lookup("GROQ_BASE_URL")
            .unwrap_or_else(|| "https://api.groq.com/openai/v1".to_string())
            .trim_end_matches('/')
            .to_string();
        let groq_model = lookup("GROQ_MODEL").unwrap_or_else(|| "llama3-8b-8192".to_string());

        let groq_max_tokens = parse_bounded(&lookup, "GROQ_MAX_TOKENS", 800, 100, 800)?;
        let groq_timeout_secs = parse_bounded(&lookup, "GROQ_TIMEOUT_SECS", 30, 1, 120)?;

        Ok(Self {
            bind_address,
            log_level,
            data_dir,
            storage_backend,
            cors_origin,
            groq_api_key,
            groq_base_url,
            groq_model,
            groq_max_tokens,
            groq_timeout: Duration::from_secs(u64::from(groq_timeout_secs)),
        })
    }
}

fn parse_bounded<F>(
    lookup: &F,
    name: &str,
    default: u32,
    min: u32,
    max: u32,
) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    let value = raw
        .trim()
        .parse::<u32>()
        .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string()))?;
    if !(min..=max).contains(&value) {
        return Err(ConfigError::InvalidValue(
            name.to_string(),
            format!("{} is outside {}..={}", value, min, max),
        ));
    }
    Ok(value)
}
