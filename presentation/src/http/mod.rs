//! HTTP server module

mod api;
mod error;
mod identity;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use api::{CreateLectureResponse, HealthResponse, SimplifyResponse, SuccessResponse};
pub use error::{ApiError, ErrorResponse};
pub use identity::{Caller, USER_ID_HEADER, USER_NAME_HEADER, USER_ROLE_HEADER};

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/create-lecture", post(api::create_lecture))
        .route("/api/get-room-data", get(api::get_room_data))
        .route("/api/submit-response", post(api::submit_response))
        .route("/api/get-user-sessions", get(api::get_user_sessions))
        .route("/api/results", get(api::results))
        .route("/api/session-status", post(api::session_status))
        .route("/api/simplify", post(api::simplify))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Collaborators;
    use async_trait::async_trait;
    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::{TestRequest, TestServer};
    use pulse_application::{
        EvaluationError, FeedbackEvaluator, LogStore, RoomCodeGenerator, SessionParams,
        SimplifyError, Simplifier, StoreError, StreamInfo,
    };
    use pulse_domain::{Evaluation, Question, RoomCode, StreamName, StudentAnswer};
    use pulse_infrastructure::InMemoryLogStore;
    use serde_json::{Value, json};

    struct FixedCode;

    impl RoomCodeGenerator for FixedCode {
        fn next_code(&self) -> RoomCode {
            RoomCode::clamped(4821)
        }
    }

    struct CannedEvaluator;

    #[async_trait]
    impl FeedbackEvaluator for CannedEvaluator {
        async fn generate_quiz(&self, _lecture: &str) -> Result<Vec<Question>, EvaluationError> {
            Ok(vec![
                Question::new(1, "What do plants make from light?"),
                Question::new(2, "Where does photosynthesis happen?"),
            ])
        }

        async fn evaluate_answers(
            &self,
            _lecture: &str,
            _question: &str,
            _answers: &[StudentAnswer],
        ) -> Result<Evaluation, EvaluationError> {
            Ok(Evaluation {
                positive_summary: "Most students know sugar is produced".to_string(),
                improvement_summary: "Some confusion about where oxygen comes from".to_string(),
                teacher_feedback: "Trace the oxygen atoms. Draw the water split.".to_string(),
            })
        }

        async fn recommend_reteach(
            &self,
            _lecture: &str,
            _question: &str,
        ) -> Result<String, EvaluationError> {
            Ok("Class, let's pause for a moment...".to_string())
        }
    }

    struct OfflineSimplifier;

    #[async_trait]
    impl Simplifier for OfflineSimplifier {
        async fn simplify(&self, _text: &str) -> Result<String, SimplifyError> {
            Err(SimplifyError::NotConfigured)
        }
    }

    /// Store whose every call fails with a credential-bearing error body
    struct RejectingStore;

    #[async_trait]
    impl LogStore for RejectingStore {
        async fn append_body(&self, _stream: &StreamName, _body: String) -> Result<(), StoreError> {
            Err(rejected())
        }

        async fn read_bodies(
            &self,
            _stream: &StreamName,
            _start_seq: u64,
            _limit: usize,
        ) -> Result<Vec<String>, StoreError> {
            Err(rejected())
        }

        async fn list_streams(&self) -> Result<Vec<StreamInfo>, StoreError> {
            Err(rejected())
        }
    }

    fn rejected() -> StoreError {
        StoreError::Http {
            status: 401,
            body: "token sk-secret rejected".to_string(),
        }
    }

    fn test_server() -> TestServer {
        test_server_with(Arc::new(InMemoryLogStore::new()))
    }

    fn test_server_with(store: Arc<dyn LogStore>) -> TestServer {
        let deps = Collaborators {
            store,
            evaluator: Arc::new(CannedEvaluator),
            simplifier: Arc::new(OfflineSimplifier),
            codes: Arc::new(FixedCode),
        };
        let state = Arc::new(AppState::new(deps, SessionParams::default()));
        TestServer::new(create_router(state)).unwrap()
    }

    fn as_user(request: TestRequest, user_id: &'static str, role: &'static str) -> TestRequest {
        request
            .add_header(
                HeaderName::from_static(USER_ID_HEADER),
                HeaderValue::from_static(user_id),
            )
            .add_header(
                HeaderName::from_static(USER_ROLE_HEADER),
                HeaderValue::from_static(role),
            )
    }

    async fn create_lecture(server: &TestServer) -> String {
        let response = as_user(server.post("/api/create-lecture"), "abc", "teacher")
            .json(&json!({
                "lecture_text": "Photosynthesis turns light into sugar.",
                "quiz": [{"id": 1, "question": "Explain photosynthesis"}]
            }))
            .await;
        response.assert_status_ok();
        response.json::<CreateLectureResponse>().room_code
    }

    #[tokio::test]
    async fn test_router_has_health_endpoint() {
        let server = test_server();
        let response = server.get("/api/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<HealthResponse>().status, "ok");
    }

    #[tokio::test]
    async fn test_create_then_read_back() {
        let server = test_server();
        let room_code = create_lecture(&server).await;
        assert_eq!(room_code, "4821");

        let response = server
            .get("/api/get-room-data")
            .add_query_param("room_code", &room_code)
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        let records = body["records"].as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["type"], "quiz_data");
        assert_eq!(records[0]["quiz"][0]["question"], "Explain photosynthesis");
    }

    #[tokio::test]
    async fn test_create_generates_quiz_when_absent() {
        let server = test_server();
        let response = as_user(server.post("/api/create-lecture"), "abc", "teacher")
            .json(&json!({"lecture_text": "Chloroplasts capture light."}))
            .await;
        response.assert_status_ok();

        let body: Value = server
            .get("/api/get-room-data")
            .add_query_param("room_code", "4821")
            .await
            .json();
        assert_eq!(body["records"][0]["quiz"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_requires_presenter() {
        let server = test_server();
        let body = json!({"lecture_text": "Lecture"});

        let response = server.post("/api/create-lecture").json(&body).await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let response = as_user(server.post("/api/create-lecture"), "s1", "student")
            .json(&body)
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(response.json::<Value>()["error"], "Teacher role required");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_lecture() {
        let server = test_server();
        let response = as_user(server.post("/api/create-lecture"), "abc", "teacher")
            .json(&json!({"lecture_text": "   "}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_room_is_not_found() {
        let server = test_server();
        let response = server
            .get("/api/get-room-data")
            .add_query_param("room_code", "9999")
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["code"], "INVALID_CODE");
    }

    #[tokio::test]
    async fn test_store_failure_hides_upstream_detail() {
        let server = test_server_with(Arc::new(RejectingStore));

        let response = server
            .get("/api/get-room-data")
            .add_query_param("room_code", "4821")
            .await;
        response.assert_status(StatusCode::BAD_GATEWAY);
        let body = response.json::<Value>();
        assert_eq!(body["error"], "Upstream service unavailable, please try again");
        assert_eq!(body["code"], "UPSTREAM_ERROR");
        assert!(!response.text().contains("sk-secret"));

        let response = as_user(server.post("/api/create-lecture"), "abc", "teacher")
            .json(&json!({
                "lecture_text": "Photosynthesis turns light into sugar.",
                "quiz": [{"id": 1, "question": "Explain photosynthesis"}]
            }))
            .await;
        response.assert_status(StatusCode::BAD_GATEWAY);
        assert!(!response.text().contains("sk-secret"));
    }

    #[tokio::test]
    async fn test_malformed_room_code_is_bad_request() {
        let server = test_server();
        let response = server
            .get("/api/get-room-data")
            .add_query_param("room_code", "12a4")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = server.get("/api/get-room-data").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submit_and_aggregate() {
        let server = test_server();
        let room_code = create_lecture(&server).await;

        let response = server
            .post("/api/submit-response")
            .json(&json!({
                "room_code": room_code,
                "student_id": "p1",
                "answers": [{"q_id": 1, "answer": "Plants make sugar from light"}]
            }))
            .await;
        response.assert_status_ok();
        assert!(response.json::<SuccessResponse>().success);

        let response = as_user(server.get("/api/results"), "abc", "teacher")
            .add_query_param("room_code", &room_code)
            .await;
        response.assert_status_ok();
        let results: Value = response.json();
        assert_eq!(results["total_responses"], 1);
        assert_eq!(
            results["per_question_feedback"]["1"]["student_responses"][0]["student_id"],
            "p1"
        );
        assert_eq!(
            results["ai_recommendation"],
            "Class, let's pause for a moment..."
        );
    }

    #[tokio::test]
    async fn test_submit_requires_answers() {
        let server = test_server();
        let room_code = create_lecture(&server).await;

        let response = server
            .post("/api/submit-response")
            .json(&json!({"room_code": room_code, "student_id": "p1"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "answers is required");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let server = test_server();
        let response = server
            .post("/api/submit-response")
            .content_type("application/json")
            .text("{not json")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_completed_session_rejects_submissions() {
        let server = test_server();
        let room_code = create_lecture(&server).await;

        let response = as_user(server.post("/api/session-status"), "abc", "teacher")
            .json(&json!({"room_code": room_code, "status": "completed"}))
            .await;
        response.assert_status_ok();

        let response = server
            .post("/api/submit-response")
            .json(&json!({
                "room_code": room_code,
                "student_id": "p1",
                "answers": [{"q_id": 1, "answer": "Sugar"}]
            }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_session_status_is_owner_only() {
        let server = test_server();
        let room_code = create_lecture(&server).await;

        let response = as_user(server.post("/api/session-status"), "other", "teacher")
            .json(&json!({"room_code": room_code, "status": "completed"}))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        let response = as_user(server.post("/api/session-status"), "abc", "teacher")
            .json(&json!({"room_code": room_code, "status": "archived"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_user_sessions_filtered_by_status() {
        let server = test_server();
        let room_code = create_lecture(&server).await;

        let response = as_user(server.get("/api/get-user-sessions"), "abc", "teacher")
            .add_query_param("status", "active")
            .await;
        response.assert_status_ok();
        let directory: Value = response.json();
        assert_eq!(directory["total_count"], 1);
        assert_eq!(directory["user_id"], "abc");
        assert_eq!(directory["sessions"][0]["room_code"], room_code.as_str());

        let response = as_user(server.get("/api/get-user-sessions"), "abc", "teacher")
            .add_query_param("status", "completed")
            .await;
        assert_eq!(response.json::<Value>()["total_count"], 0);

        let response = as_user(server.get("/api/get-user-sessions"), "other", "teacher").await;
        assert_eq!(response.json::<Value>()["total_count"], 0);

        let response = server.get("/api/get-user-sessions").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_simplify_falls_back_when_service_is_down() {
        let server = test_server();
        let response = server
            .post("/api/simplify")
            .json(&json!({"text": "Describe the role of NADPH in the Calvin cycle"}))
            .await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<SimplifyResponse>().simplified_text,
            "What does NADPH do in the plant cell?"
        );

        let response = server
            .post("/api/simplify")
            .json(&json!({"text": ""}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
