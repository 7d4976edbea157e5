//! Twirp JSON wire types for the LiveKit room and egress services.
//!
//! Requests use protobuf field names; responses accept both protobuf and
//! camelCase names since servers emit either depending on version.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateRoomRequest {
    pub name: String,
    /// Seconds of inactivity before the backend deletes the room.
    pub empty_timeout: u32,
    pub max_participants: u32,
    pub metadata: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoomInfo {
    pub sid: String,
    pub name: String,
    #[serde(default, alias = "emptyTimeout")]
    pub empty_timeout: u32,
    #[serde(default, alias = "maxParticipants")]
    pub max_participants: u32,
    /// Unix seconds. int64 arrives as a JSON string under protojson.
    #[serde(default, alias = "creationTime", deserialize_with = "int64")]
    pub creation_time: i64,
    #[serde(default)]
    pub metadata: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomCompositeEgressRequest {
    pub room_name: String,
    pub layout: String,
    pub audio_only: bool,
    pub file_outputs: Vec<EncodedFileOutput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EncodedFileType {
    #[serde(rename = "MP4")]
    Mp4,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedFileOutput {
    pub file_type: EncodedFileType,
    pub filepath: String,
    pub s3: S3Upload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct S3Upload {
    pub access_key: String,
    pub secret: String,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    pub bucket: String,
    pub force_path_style: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EgressInfo {
    #[serde(alias = "egressId")]
    pub egress_id: String,
    #[serde(default, alias = "roomName")]
    pub room_name: String,
}

/// Twirp error body: `{"code": "...", "msg": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct TwirpError {
    pub code: String,
    pub msg: String,
}

fn int64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(i64),
        Text(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Number(n) => Ok(n),
        Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}
