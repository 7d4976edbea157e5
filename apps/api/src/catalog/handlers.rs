use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::agent::{AgentProfile, Category};
use crate::models::job::JobDescription;
use crate::models::report::InterviewReport;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AgentQuery {
    #[serde(rename = "type")]
    pub agent_type: Option<String>,
}

/// GET /api/v1/categories
pub async fn handle_list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.catalog.categories())
}

/// GET /api/v1/agents
pub async fn handle_list_agents(
    State(state): State<AppState>,
    Query(params): Query<AgentQuery>,
) -> Json<Vec<AgentProfile>> {
    let agents = match params.agent_type.as_deref() {
        Some(agent_type) => state.catalog.agents_of(agent_type).cloned().collect(),
        None => state
            .catalog
            .categories()
            .into_iter()
            .flat_map(|c| c.agents)
            .collect(),
    };
    Json(agents)
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Json<Vec<JobDescription>> {
    Json(state.catalog.jobs().to_vec())
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobDescription>, AppError> {
    state
        .catalog
        .job(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job description {id} not found")))
}

/// GET /api/v1/interviews/:session_id/report
///
/// Reports are static display data; every session gets the fixture report.
pub async fn handle_get_report(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<InterviewReport> {
    Json(state.catalog.report().for_session(&session_id))
}
