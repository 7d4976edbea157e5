//! Session naming and descriptor construction. Pure apart from the id source.

use chrono::Utc;
use uuid::Uuid;

use crate::models::agent::AgentProfile;
use crate::models::job::JobDescription;
use crate::session::descriptor::{SessionDescriptor, SessionType};
use crate::session::persona::{interviewer_persona, InterviewRound};

/// `{practice_type}-{agent_name}-{uuid}`; a fresh UUID on every call.
pub fn demo_room_name(practice_type: &str, agent_name: &str) -> String {
    format!("{practice_type}-{agent_name}-{}", Uuid::new_v4())
}

pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Demo sessions carry the selected agent verbatim.
pub fn demo_descriptor(practice_type: &str, agent: &AgentProfile) -> SessionDescriptor {
    SessionDescriptor {
        session_id: demo_room_name(practice_type, &agent.name),
        metadata: agent.clone(),
        session_type: SessionType::Demo,
        created_at: Utc::now(),
    }
}

/// Interview sessions use the caller's id so the client can route to the room before it exists.
pub fn interview_descriptor(
    session_id: &str,
    job: &JobDescription,
    round: &InterviewRound,
) -> Result<SessionDescriptor, serde_json::Error> {
    Ok(SessionDescriptor {
        session_id: session_id.to_string(),
        metadata: interviewer_persona(job, round)?,
        session_type: SessionType::Interview,
        created_at: Utc::now(),
    })
}
