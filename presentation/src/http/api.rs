//! REST handlers for the session API

use super::error::ApiError;
use super::identity::Caller;
use crate::state::AppState;
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use pulse_application::{CreateSessionInput, PulseError, SessionDirectory, SubmitResponseInput};
use pulse_domain::{Answer, Question, SessionResults, SessionStatus, StoredRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

type Shared = State<Arc<AppState>>;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Acknowledgement for writes that return nothing else
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateLectureRequest {
    #[serde(default)]
    pub lecture_text: String,
    #[serde(default)]
    pub quiz: Option<Vec<Question>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateLectureResponse {
    pub room_code: String,
}

#[derive(Debug, Deserialize)]
pub struct RoomQuery {
    #[serde(default)]
    pub room_code: String,
}

#[derive(Debug, Serialize)]
pub struct RoomDataResponse {
    pub records: Vec<StoredRecord>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitResponseRequest {
    #[serde(default)]
    pub room_code: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

#[derive(Debug, Deserialize)]
pub struct SessionsQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SessionStatusRequest {
    #[serde(default)]
    pub room_code: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct SimplifyRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SimplifyResponse {
    pub simplified_text: String,
}

fn parse_status(raw: &str) -> Result<SessionStatus, PulseError> {
    if raw.trim().is_empty() {
        return Err(PulseError::validation("status", "status is required"));
    }
    Ok(raw.parse::<SessionStatus>()?)
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /api/create-lecture
pub async fn create_lecture(
    State(state): Shared,
    caller: Caller,
    body: Result<Json<CreateLectureRequest>, JsonRejection>,
) -> Result<Json<CreateLectureResponse>, ApiError> {
    let Json(body) = body?;
    let mut input = CreateSessionInput::new(body.lecture_text);
    if let Some(quiz) = body.quiz {
        input = input.with_quiz(quiz);
    }

    let output = state
        .create_session
        .execute(caller.identity(), input)
        .await?;
    Ok(Json(CreateLectureResponse {
        room_code: output.room_code.to_string(),
    }))
}

/// GET /api/get-room-data?room_code=NNNN
pub async fn get_room_data(
    State(state): Shared,
    query: Result<Query<RoomQuery>, QueryRejection>,
) -> Result<Json<RoomDataResponse>, ApiError> {
    let Query(query) = query?;
    let room = state.fetch_room_data.execute(&query.room_code).await?;
    debug!(stream = %room.stream, "Serving room data");
    Ok(Json(RoomDataResponse {
        records: room.records,
    }))
}

/// POST /api/submit-response
pub async fn submit_response(
    State(state): Shared,
    body: Result<Json<SubmitResponseRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(body) = body?;
    state
        .submit_response
        .execute(SubmitResponseInput {
            room_code: body.room_code,
            student_id: body.student_id,
            answers: body.answers,
        })
        .await?;
    Ok(SuccessResponse::ok())
}

/// GET /api/get-user-sessions?status=active|completed
pub async fn get_user_sessions(
    State(state): Shared,
    caller: Caller,
    query: Result<Query<SessionsQuery>, QueryRejection>,
) -> Result<Json<SessionDirectory>, ApiError> {
    let Query(query) = query?;
    let status = query.status.as_deref().map(parse_status).transpose()?;
    let directory = state
        .list_sessions
        .execute(caller.identity(), status)
        .await?;
    Ok(Json(directory))
}

/// GET /api/results?room_code=NNNN
pub async fn results(
    State(state): Shared,
    caller: Caller,
    query: Result<Query<RoomQuery>, QueryRejection>,
) -> Result<Json<SessionResults>, ApiError> {
    let Query(query) = query?;
    let results = state
        .aggregate_feedback
        .execute(caller.identity(), &query.room_code)
        .await?;
    Ok(Json(results))
}

/// POST /api/session-status
pub async fn session_status(
    State(state): Shared,
    caller: Caller,
    body: Result<Json<SessionStatusRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(body) = body?;
    let status = parse_status(&body.status)?;
    state
        .set_status
        .execute(caller.identity(), &body.room_code, status)
        .await?;
    Ok(SuccessResponse::ok())
}

/// POST /api/simplify
pub async fn simplify(
    State(state): Shared,
    body: Result<Json<SimplifyRequest>, JsonRejection>,
) -> Result<Json<SimplifyResponse>, ApiError> {
    let Json(body) = body?;
    let simplified_text = state.simplify.execute(&body.text).await?;
    Ok(Json(SimplifyResponse { simplified_text }))
}
