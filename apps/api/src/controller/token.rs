use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::ConnectionError;

/// What the token endpoint hands back for one participant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinToken {
    pub server_url: String,
    #[serde(default)]
    pub participant_token: Option<String>,
}

/// Issues join tokens for a room. The issuer itself lives outside this service.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch(&self, room: &str, username: &str) -> Result<JoinToken, ConnectionError>;
}

/// `GET {base}/api/token?room=..&username=..`
#[derive(Clone)]
pub struct HttpTokenSource {
    client: Client,
    base_url: String,
}

impl HttpTokenSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl TokenSource for HttpTokenSource {
    async fn fetch(&self, room: &str, username: &str) -> Result<JoinToken, ConnectionError> {
        let response = self
            .client
            .get(format!("{}/api/token", self.base_url))
            .query(&[("room", room), ("username", username)])
            .send()
            .await
            .map_err(|e| ConnectionError::TokenRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectionError::TokenRequest(format!("HTTP {status}: {body}")));
        }

        response
            .json::<JoinToken>()
            .await
            .map_err(|e| ConnectionError::TokenRequest(e.to_string()))
    }
}
