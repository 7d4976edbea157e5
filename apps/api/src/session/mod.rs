// Session lifecycle: descriptor building, room provisioning, best-effort
// recording, and the HTTP handlers that front them.
// All video backend calls go through livekit::VideoBackend.

pub mod builder;
pub mod descriptor;
pub mod handlers;
pub mod persona;
pub mod provisioner;
pub mod recording;
pub mod service;

use thiserror::Error;

use crate::config::ConfigError;
use crate::livekit::BackendError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Room creation failed: {0}")]
    Backend(#[from] BackendError),

    #[error("Metadata serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ConfigError> for SessionError {
    fn from(err: ConfigError) -> Self {
        SessionError::Configuration(err.to_string())
    }
}
