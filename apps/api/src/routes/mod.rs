pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::session::handlers as sessions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Reference data
        .route("/api/v1/categories", get(catalog::handle_list_categories))
        .route("/api/v1/agents", get(catalog::handle_list_agents))
        .route("/api/v1/jobs", get(catalog::handle_list_jobs))
        .route("/api/v1/jobs/:id", get(catalog::handle_get_job))
        .route("/api/v1/interview-rounds", get(sessions::handle_list_rounds))
        // Session creation
        .route(
            "/api/v1/demo/sessions",
            post(sessions::handle_create_demo_session),
        )
        .route(
            "/api/v1/interviews/sessions",
            post(sessions::handle_create_interview_session),
        )
        .route(
            "/api/v1/interviews/:id/start",
            post(sessions::handle_start_interview),
        )
        // Reports (static display data)
        .route(
            "/api/v1/interviews/:id/report",
            get(catalog::handle_get_report),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::Catalog;
    use crate::config::LiveKitSettings;
    use crate::session::service::SessionService;
    use crate::session::testing::{configured_config, FakeBackend};

    fn app_with(backend: Arc<FakeBackend>, livekit: Option<LiveKitSettings>) -> Router {
        let catalog = Arc::new(Catalog::embedded().unwrap());
        let mut config = configured_config();
        if let Some(livekit) = livekit {
            config.livekit = livekit;
        }
        build_router(AppState {
            sessions: SessionService::new(catalog.clone(), &config, backend),
            catalog,
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart(uri: &str, parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let boundary = "XBOUNDARY";
        let mut body = String::new();
        for (name, content_type, value) in parts {
            body.push_str(&format!("--{boundary}\r\n"));
            match content_type {
                Some(ct) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"resume\"\r\nContent-Type: {ct}\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{boundary}--\r\n"));

        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app_with(Arc::new(FakeBackend::default()), None);
        let (status, body) = send(app, Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_job_is_404() {
        let app = app_with(Arc::new(FakeBackend::default()), None);
        let (status, body) =
            send(app, Request::get("/api/v1/jobs/nope").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_agents_filtered_by_type() {
        let app = app_with(Arc::new(FakeBackend::default()), None);
        let (status, body) = send(
            app,
            Request::get("/api/v1/agents?type=presentation")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let agents = body.as_array().unwrap();
        assert!(!agents.is_empty());
        assert!(agents.iter().all(|a| a["type"] == "presentation"));
    }

    #[tokio::test]
    async fn test_interview_rounds_listed_in_order() {
        let app = app_with(Arc::new(FakeBackend::default()), None);
        let (_, body) = send(
            app,
            Request::get("/api/v1/interview-rounds")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap())
            .collect();
        assert_eq!(
            ids,
            vec![
                "hr",
                "coding",
                "system-design",
                "problem-solving",
                "domain-specific",
                "aptitude",
                "case-study"
            ]
        );
    }

    #[tokio::test]
    async fn test_create_demo_session() {
        let backend = Arc::new(FakeBackend::default());
        let app = app_with(backend.clone(), None);
        let (status, body) = send(
            app,
            post_json(
                "/api/v1/demo/sessions",
                json!({"type": "interview", "agent_name": "Alex"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["room"]["name"]
            .as_str()
            .unwrap()
            .starts_with("interview-Alex-"));
        assert_eq!(body["room"]["empty_timeout"], 120);
        assert_eq!(body["context"]["session_type"], "demo");
        assert_eq!(backend.room_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_path_like_session_id_is_bad_request() {
        let backend = Arc::new(FakeBackend::default());
        let app = app_with(backend.clone(), None);
        let (status, body) = send(
            app,
            post_json(
                "/api/v1/interviews/sessions",
                json!({"job_id": "jd-001", "interview_round": "hr", "session_id": "../demo-room"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(backend.room_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_configuration_redirects_without_backend_call() {
        let backend = Arc::new(FakeBackend::default());
        let app = app_with(backend.clone(), Some(LiveKitSettings::default()));
        let (status, body) = send(
            app,
            post_json(
                "/api/v1/interviews/sessions",
                json!({"job_id": "jd-001", "interview_round": "hr"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["redirect"], "/error");
        assert_eq!(backend.room_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_backend_failure_is_bad_gateway() {
        let backend = Arc::new(FakeBackend::failing_rooms());
        let app = app_with(backend, None);
        let (status, body) = send(
            app,
            post_json(
                "/api/v1/demo/sessions",
                json!({"type": "general", "agent_name": "Sam"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "BACKEND_ERROR");
    }

    #[tokio::test]
    async fn test_start_interview_with_pdf_resume() {
        let backend = Arc::new(FakeBackend::default());
        let app = app_with(backend.clone(), None);
        let (status, body) = send(
            app,
            multipart(
                "/api/v1/interviews/jd-003/start",
                &[
                    ("interviewRound", None, "system-design"),
                    ("resume", Some("application/pdf"), "%PDF-1.4 fake"),
                ],
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let session_id = body["context"]["session_id"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(session_id).is_ok());
        assert_eq!(body["room"]["name"], session_id);
        assert_eq!(body["agent"]["level"], "Expert");
        assert_eq!(body["context"]["job_id"], "jd-003");
        assert_eq!(backend.egress_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_start_interview_rejects_non_pdf() {
        let backend = Arc::new(FakeBackend::default());
        let app = app_with(backend.clone(), None);
        let (status, body) = send(
            app,
            multipart(
                "/api/v1/interviews/jd-001/start",
                &[
                    ("interviewRound", None, "hr"),
                    ("resume", Some("text/plain"), "not a pdf"),
                ],
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Please select a PDF file");
        assert_eq!(backend.room_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_start_interview_requires_round_and_resume() {
        let app = app_with(Arc::new(FakeBackend::default()), None);
        let (status, body) = send(
            app,
            multipart(
                "/api/v1/interviews/jd-001/start",
                &[("interviewRound", None, "hr")],
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Please fill all required fields");
    }

    #[tokio::test]
    async fn test_report_is_keyed_by_session() {
        let app = app_with(Arc::new(FakeBackend::default()), None);
        let (status, body) = send(
            app,
            Request::get("/api/v1/interviews/sess-42/report")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sessionId"], "sess-42");
        assert!(body["reportSummary"]["strengths"].is_array());
    }
}
