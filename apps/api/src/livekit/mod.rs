/// LiveKit client — the single point of entry for all video backend calls.
///
/// No other module may call the room or egress services directly; everything
/// goes through the `VideoBackend` trait so tests can substitute a fake.
/// Calls are never retried: a retried room creation could produce a duplicate room.
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::LiveKitCredentials;

pub mod auth;
pub mod models;

use auth::{sign_access_token, VideoGrant};
use models::{CreateRoomRequest, EgressInfo, RoomCompositeEgressRequest, RoomInfo, TwirpError};

const ROOM_SERVICE: &str = "livekit.RoomService";
const EGRESS_SERVICE: &str = "livekit.Egress";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid LiveKit URL: {0}")]
    InvalidUrl(String),
}

/// The room-management surface this service needs from the video backend.
#[async_trait]
pub trait VideoBackend: Send + Sync {
    async fn create_room(
        &self,
        creds: &LiveKitCredentials,
        request: &CreateRoomRequest,
    ) -> Result<RoomInfo, BackendError>;

    async fn start_room_composite_egress(
        &self,
        creds: &LiveKitCredentials,
        request: &RoomCompositeEgressRequest,
    ) -> Result<EgressInfo, BackendError>;
}

/// Twirp-over-HTTP client for the LiveKit server API.
#[derive(Clone)]
pub struct LiveKitClient {
    client: Client,
}

impl LiveKitClient {
    pub fn new() -> Result<Self, BackendError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
        })
    }

    async fn call<Req, Resp>(
        &self,
        creds: &LiveKitCredentials,
        service: &str,
        method: &str,
        grant: VideoGrant,
        body: &Req,
    ) -> Result<Resp, BackendError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/twirp/{service}/{method}", http_base(&creds.url)?);
        let token = sign_access_token(&creds.api_key, &creds.api_secret, grant)?;

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<TwirpError>(&body)
                .map(|e| format!("{}: {}", e.code, e.msg))
                .unwrap_or(body);
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!("LiveKit {service}/{method} succeeded");
        Ok(response.json().await?)
    }
}

#[async_trait]
impl VideoBackend for LiveKitClient {
    async fn create_room(
        &self,
        creds: &LiveKitCredentials,
        request: &CreateRoomRequest,
    ) -> Result<RoomInfo, BackendError> {
        self.call(
            creds,
            ROOM_SERVICE,
            "CreateRoom",
            VideoGrant::room_create(),
            request,
        )
        .await
    }

    async fn start_room_composite_egress(
        &self,
        creds: &LiveKitCredentials,
        request: &RoomCompositeEgressRequest,
    ) -> Result<EgressInfo, BackendError> {
        self.call(
            creds,
            EGRESS_SERVICE,
            "StartRoomCompositeEgress",
            VideoGrant::room_record(),
            request,
        )
        .await
    }
}

/// Maps the configured signalling URL to the HTTP base of the server API.
fn http_base(url: &str) -> Result<String, BackendError> {
    let url = url.trim().trim_end_matches('/');
    let mapped = if let Some(rest) = url.strip_prefix("wss://") {
        format!("https://{rest}")
    } else if let Some(rest) = url.strip_prefix("ws://") {
        format!("http://{rest}")
    } else if url.starts_with("https://") || url.starts_with("http://") {
        url.to_string()
    } else {
        return Err(BackendError::InvalidUrl(url.to_string()));
    };
    Ok(mapped)
}
