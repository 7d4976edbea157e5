//! Axum route handlers for session creation.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::session::builder::new_session_id;
use crate::session::persona::RoundKind;
use crate::session::service::{
    CreateDemoSessionRequest, CreateInterviewSessionRequest, DemoSession, InterviewSession,
};
use crate::state::AppState;

const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Serialize)]
pub struct RoundOption {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// POST /api/v1/demo/sessions
pub async fn handle_create_demo_session(
    State(state): State<AppState>,
    Json(request): Json<CreateDemoSessionRequest>,
) -> Result<Json<DemoSession>, AppError> {
    let session = state.sessions.create_demo_session(request).await?;
    Ok(Json(session))
}

/// POST /api/v1/interviews/sessions
pub async fn handle_create_interview_session(
    State(state): State<AppState>,
    Json(request): Json<CreateInterviewSessionRequest>,
) -> Result<Json<InterviewSession>, AppError> {
    let session = state.sessions.create_interview_session(request).await?;
    Ok(Json(session))
}

/// POST /api/v1/interviews/:job_id/start
///
/// Multipart form with `interviewRound` and a PDF `resume`. The resume is
/// checked for type and discarded; the session id is generated here.
pub async fn handle_start_interview(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<InterviewSession>, AppError> {
    let mut interview_round: Option<String> = None;
    let mut resume_is_pdf: Option<bool> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid form data: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("interviewRound") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid form data: {e}")))?;
                interview_round = Some(text).filter(|t| !t.trim().is_empty());
            }
            Some("resume") => {
                let is_pdf = field.content_type() == Some(PDF_CONTENT_TYPE);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid form data: {e}")))?;
                if !bytes.is_empty() {
                    resume_is_pdf = Some(is_pdf);
                }
            }
            _ => {}
        }
    }

    let (Some(interview_round), Some(resume_is_pdf)) = (interview_round, resume_is_pdf) else {
        return Err(AppError::Validation(
            "Please fill all required fields".to_string(),
        ));
    };
    if !resume_is_pdf {
        return Err(AppError::Validation("Please select a PDF file".to_string()));
    }

    let session_id = new_session_id();
    info!("Starting interview {session_id} for job {job_id}");

    let session = state
        .sessions
        .create_interview_session(CreateInterviewSessionRequest {
            job_id,
            interview_round,
            session_id: Some(session_id),
            enable_recording: Some(true),
        })
        .await?;
    Ok(Json(session))
}

/// GET /api/v1/interview-rounds
pub async fn handle_list_rounds() -> Json<Vec<RoundOption>> {
    Json(
        RoundKind::SELECTABLE
            .iter()
            .map(|kind| RoundOption {
                id: kind.id(),
                label: kind.label(),
                description: kind.description(),
            })
            .collect(),
    )
}
