use std::path::PathBuf;

use anyhow::{Context, Result};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} is not defined")]
    MissingSetting(&'static str),
}

/// Application configuration loaded from environment variables.
///
/// Video backend and storage values are optional at startup. Room creation
/// checks the video backend values per call, recording checks storage values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub catalog_dir: Option<PathBuf>,
    pub livekit: LiveKitSettings,
    pub storage: StorageSettings,
}

/// Connection settings for the LiveKit room-management API.
#[derive(Debug, Clone, Default)]
pub struct LiveKitSettings {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

/// A complete set of LiveKit credentials, produced only by `LiveKitSettings::credentials`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveKitCredentials {
    pub url: String,
    pub api_key: String,
    pub api_secret: String,
}

/// S3-compatible storage target for recordings.
#[derive(Debug, Clone, Default)]
pub struct StorageSettings {
    pub bucket: Option<String>,
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// Custom endpoint for non-AWS backends such as MinIO.
    pub endpoint: Option<String>,
}

const DEFAULT_REGION: &str = "us-east-1";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: optional("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            catalog_dir: optional("CATALOG_DIR").map(PathBuf::from),
            livekit: LiveKitSettings {
                url: optional("LIVEKIT_URL"),
                api_key: optional("LIVEKIT_API_KEY"),
                api_secret: optional("LIVEKIT_API_SECRET"),
            },
            storage: StorageSettings {
                bucket: optional("AWS_S3_BUCKET_NAME"),
                region: optional("AWS_S3_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
                access_key: optional("AWS_S3_ACCESS_KEY"),
                secret_key: optional("AWS_S3_SECRET_KEY"),
                endpoint: optional("AWS_S3_ENDPOINT_URL"),
            },
        })
    }
}

impl LiveKitSettings {
    /// Returns the full credential set, or a configuration error naming the first missing value.
    pub fn credentials(&self) -> Result<LiveKitCredentials, ConfigError> {
        Ok(LiveKitCredentials {
            url: require(&self.url, "LIVEKIT_URL")?,
            api_key: require(&self.api_key, "LIVEKIT_API_KEY")?,
            api_secret: require(&self.api_secret, "LIVEKIT_API_SECRET")?,
        })
    }
}

fn require(value: &Option<String>, key: &'static str) -> Result<String, ConfigError> {
    value.clone().ok_or(ConfigError::MissingSetting(key))
}
