//! Session creation — the two flows that stand behind the practice and interview pages.
//!
//! Flow: build descriptor → provision room (fatal on failure) →
//!       best-effort recording → return room plus navigation context.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::livekit::VideoBackend;
use crate::models::agent::AgentProfile;
use crate::session::builder::{demo_descriptor, interview_descriptor, new_session_id};
use crate::session::descriptor::{RoomRecord, SessionContext};
use crate::session::persona::InterviewRound;
use crate::session::provisioner::RoomProvisioner;
use crate::session::recording::RecordingOrchestrator;
use crate::session::SessionError;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDemoSessionRequest {
    /// Practice category, e.g. `interview` or `presentation`.
    #[serde(rename = "type")]
    pub practice_type: String,
    pub agent_name: String,
    #[serde(default)]
    pub enable_recording: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInterviewSessionRequest {
    pub job_id: String,
    pub interview_round: String,
    /// Chosen by the caller so it can navigate to a predictable room path.
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub enable_recording: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoSession {
    pub room: RoomRecord,
    pub egress_id: Option<String>,
    pub context: SessionContext,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewSession {
    pub room: RoomRecord,
    pub agent: AgentProfile,
    pub egress_id: Option<String>,
    pub context: SessionContext,
}

// ────────────────────────────────────────────────────────────────────────────
// Service
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct SessionService {
    catalog: Arc<Catalog>,
    provisioner: RoomProvisioner,
    recorder: RecordingOrchestrator,
}

impl SessionService {
    pub fn new(catalog: Arc<Catalog>, config: &Config, backend: Arc<dyn VideoBackend>) -> Self {
        Self {
            catalog,
            provisioner: RoomProvisioner::new(config.livekit.clone(), backend.clone()),
            recorder: RecordingOrchestrator::new(
                config.livekit.clone(),
                config.storage.clone(),
                backend,
            ),
        }
    }

    pub async fn create_demo_session(
        &self,
        request: CreateDemoSessionRequest,
    ) -> Result<DemoSession, SessionError> {
        if request.practice_type.trim().is_empty() || request.agent_name.trim().is_empty() {
            return Err(SessionError::Validation(
                "type and agent_name are required".to_string(),
            ));
        }

        let agent = self
            .catalog
            .agent(&request.practice_type, &request.agent_name)
            .ok_or_else(|| {
                SessionError::NotFound(format!(
                    "Agent {} not found in category {}",
                    request.agent_name, request.practice_type
                ))
            })?;

        let descriptor = demo_descriptor(&request.practice_type, agent);
        info!("Creating demo session {}", descriptor.session_id);

        let room = self.provisioner.provision(&descriptor).await?;

        let egress = if request.enable_recording.unwrap_or(true) {
            self.recorder.start(&room.name, descriptor.session_type).await
        } else {
            None
        };

        Ok(DemoSession {
            context: SessionContext::demo(&room.name),
            room,
            egress_id: egress.map(|e| e.egress_id),
        })
    }

    pub async fn create_interview_session(
        &self,
        request: CreateInterviewSessionRequest,
    ) -> Result<InterviewSession, SessionError> {
        if request.interview_round.trim().is_empty() {
            return Err(SessionError::Validation(
                "interview_round is required".to_string(),
            ));
        }

        if let Some(id) = request.session_id.as_deref() {
            if !is_safe_session_id(id) {
                return Err(SessionError::Validation(format!(
                    "session_id {id:?} may only contain letters, digits, '-' and '_'"
                )));
            }
        }

        let job = self.catalog.job(&request.job_id).ok_or_else(|| {
            SessionError::NotFound(format!("Job description {} not found", request.job_id))
        })?;

        let round = InterviewRound::parse(&request.interview_round);
        let session_id = request.session_id.unwrap_or_else(new_session_id);

        let descriptor = interview_descriptor(&session_id, job, &round)?;
        info!(
            "Creating interview session {session_id} ({} round for {})",
            round.label, job.id
        );

        let room = self.provisioner.provision(&descriptor).await?;

        let egress = if request.enable_recording.unwrap_or(true) {
            self.recorder.start(&room.name, descriptor.session_type).await
        } else {
            None
        };

        Ok(InterviewSession {
            context: SessionContext::interview(&session_id, &job.id, &round.label),
            room,
            agent: descriptor.metadata,
            egress_id: egress.map(|e| e.egress_id),
        })
    }
}

/// A session id becomes the room name, an object key segment and a route
/// segment, so it is restricted to `[A-Za-z0-9_-]+`.
fn is_safe_session_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
