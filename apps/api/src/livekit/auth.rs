//! Server API access tokens: HS256 JWTs signed with the LiveKit API secret.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// Server API calls get short-lived tokens; one is minted per request.
const TOKEN_TTL_SECS: i64 = 600;

/// The `video` grant. Only the permissions this service needs are modelled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGrant {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub room_create: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub room_record: bool,
}

impl VideoGrant {
    pub fn room_create() -> Self {
        Self {
            room_create: true,
            ..Self::default()
        }
    }

    pub fn room_record() -> Self {
        Self {
            room_record: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    iss: String,
    nbf: i64,
    exp: i64,
    video: VideoGrant,
}

/// Signs a token for one server API call.
pub fn sign_access_token(
    api_key: &str,
    api_secret: &str,
    grant: VideoGrant,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        iss: api_key.to_string(),
        nbf: now.timestamp(),
        exp: (now + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
        video: grant,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(api_secret.as_bytes()),
    )
}
