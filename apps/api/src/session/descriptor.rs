use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::livekit::models::RoomInfo;
use crate::models::agent::AgentProfile;

/// One practice agent or interviewer plus the user.
pub const MAX_PARTICIPANTS: u32 = 2;

/// Which product surface a session belongs to. Drives timeouts, recording
/// layout, artifact paths, routes and the join username.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Demo,
    Interview,
}

impl SessionType {
    pub fn empty_timeout_secs(self) -> u32 {
        match self {
            SessionType::Demo => 120,
            SessionType::Interview => 300,
        }
    }

    /// Object key of the composite recording.
    pub fn recording_path(self, room_name: &str) -> String {
        match self {
            SessionType::Demo => format!("{room_name}/session.mp4"),
            SessionType::Interview => format!("interviews/{room_name}/session.mp4"),
        }
    }

    pub fn records_audio_only(self) -> bool {
        matches!(self, SessionType::Demo)
    }

    /// Identity the local participant joins under.
    pub fn participant_username(self) -> &'static str {
        match self {
            SessionType::Demo => "user",
            SessionType::Interview => "candidate",
        }
    }

    /// Remaining-participant count at or below which the counterpart is
    /// considered gone. The interview client still counts itself.
    pub fn participant_floor(self) -> u32 {
        match self {
            SessionType::Demo => 0,
            SessionType::Interview => 1,
        }
    }

    pub fn room_path(self, session_id: &str) -> String {
        match self {
            SessionType::Demo => format!("/room?id={session_id}"),
            SessionType::Interview => format!("/~/interviews/{session_id}"),
        }
    }

    pub fn report_path(self, session_id: &str) -> String {
        match self {
            SessionType::Demo => format!("/session-complete?room={session_id}"),
            SessionType::Interview => format!("/~/interview/{session_id}/report"),
        }
    }
}

/// Everything needed to provision one room.
#[derive(Debug, Clone, Serialize)]
pub struct SessionDescriptor {
    /// Doubles as the room name; unique per room.
    pub session_id: String,
    pub metadata: AgentProfile,
    pub session_type: SessionType,
    pub created_at: DateTime<Utc>,
}

impl SessionDescriptor {
    /// Room metadata as stored by the backend. Never parsed again by this service.
    pub fn serialized_metadata(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.metadata)
    }
}

/// Local mirror of the backend's room, returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomRecord {
    pub sid: String,
    pub name: String,
    pub metadata: String,
    pub created_at: DateTime<Utc>,
    pub empty_timeout: u32,
    pub max_participants: u32,
}

impl From<RoomInfo> for RoomRecord {
    fn from(room: RoomInfo) -> Self {
        Self {
            sid: room.sid,
            name: room.name,
            metadata: room.metadata,
            created_at: DateTime::from_timestamp(room.creation_time, 0).unwrap_or_default(),
            empty_timeout: room.empty_timeout,
            max_participants: room.max_participants,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EgressRecord {
    pub egress_id: String,
}

/// Navigation context handed back to the client in place of browser storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: String,
    pub session_type: SessionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_round: Option<String>,
    pub room_path: String,
    pub report_path: String,
}

impl SessionContext {
    pub fn demo(room_name: &str) -> Self {
        Self {
            session_id: room_name.to_string(),
            session_type: SessionType::Demo,
            job_id: None,
            interview_round: None,
            room_path: SessionType::Demo.room_path(room_name),
            report_path: SessionType::Demo.report_path(room_name),
        }
    }

    pub fn interview(session_id: &str, job_id: &str, interview_round: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            session_type: SessionType::Interview,
            job_id: Some(job_id.to_string()),
            interview_round: Some(interview_round.to_string()),
            room_path: SessionType::Interview.room_path(session_id),
            report_path: SessionType::Interview.report_path(session_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeouts_per_surface() {
        assert_eq!(SessionType::Demo.empty_timeout_secs(), 120);
        assert_eq!(SessionType::Interview.empty_timeout_secs(), 300);
    }

    #[test]
    fn test_recording_paths_are_namespaced() {
        assert_eq!(SessionType::Demo.recording_path("r1"), "r1/session.mp4");
        assert_eq!(
            SessionType::Interview.recording_path("r1"),
            "interviews/r1/session.mp4"
        );
    }

    #[test]
    fn test_room_record_converts_unix_seconds() {
        let record = RoomRecord::from(RoomInfo {
            sid: "RM_1".to_string(),
            name: "r".to_string(),
            empty_timeout: 120,
            max_participants: 2,
            creation_time: 86_400,
            metadata: "{}".to_string(),
        });
        assert_eq!(record.created_at.to_rfc3339(), "1970-01-02T00:00:00+00:00");
    }

    #[test]
    fn test_interview_context_routes() {
        let context = SessionContext::interview("abc", "jd-1", "coding");
        assert_eq!(context.room_path, "/~/interviews/abc");
        assert_eq!(context.report_path, "/~/interview/abc/report");
        assert_eq!(context.job_id.as_deref(), Some("jd-1"));
    }

    #[test]
    fn test_demo_context_omits_interview_fields() {
        let value = serde_json::to_value(SessionContext::demo("interview-X-1")).unwrap();
        assert_eq!(value["session_type"], "demo");
        assert_eq!(value["room_path"], "/room?id=interview-X-1");
        assert!(value.get("job_id").is_none());
    }
}
