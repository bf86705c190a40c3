//! Mapping of use case failures onto HTTP responses

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pulse_application::PulseError;
use serde::Serialize;

/// Message returned for upstream failures; the upstream detail stays in the logs
const UPSTREAM_MESSAGE: &str = "Upstream service unavailable, please try again";

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

/// Error returned by every handler
#[derive(Debug)]
pub struct ApiError(pub PulseError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            PulseError::Validation { .. } => StatusCode::BAD_REQUEST,
            PulseError::Unauthorized => StatusCode::UNAUTHORIZED,
            PulseError::Forbidden => StatusCode::FORBIDDEN,
            PulseError::RoomNotFound(_) => StatusCode::NOT_FOUND,
            PulseError::SessionClosed(_) => StatusCode::CONFLICT,
            PulseError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn code(&self) -> &'static str {
        match &self.0 {
            PulseError::Validation { .. } => "INVALID_REQUEST",
            PulseError::Unauthorized => "UNAUTHORIZED",
            PulseError::Forbidden => "FORBIDDEN",
            PulseError::RoomNotFound(_) => "INVALID_CODE",
            PulseError::SessionClosed(_) => "SESSION_CLOSED",
            PulseError::Upstream { .. } => "UPSTREAM_ERROR",
        }
    }
}

impl From<PulseError> for ApiError {
    fn from(e: PulseError) -> Self {
        ApiError(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(PulseError::validation("body", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(PulseError::validation("query", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = match &self.0 {
            PulseError::Upstream { .. } => UPSTREAM_MESSAGE.to_string(),
            other => other.to_string(),
        };
        let body = ErrorResponse {
            error,
            code: self.code(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (PulseError::validation("room_code", "room_code is required"), 400),
            (PulseError::Unauthorized, 401),
            (PulseError::Forbidden, 403),
            (PulseError::RoomNotFound("4821".into()), 404),
            (PulseError::SessionClosed("4821".into()), 409),
            (
                PulseError::Upstream {
                    operation: "read stream",
                    detail: "503".into(),
                },
                502,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status().as_u16(), status);
        }
    }

    #[tokio::test]
    async fn test_upstream_detail_not_exposed() {
        let response = ApiError(PulseError::Upstream {
            operation: "append record",
            detail: "token sk-secret rejected".into(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], UPSTREAM_MESSAGE);
        assert_eq!(body["code"], "UPSTREAM_ERROR");
        assert!(!String::from_utf8_lossy(&bytes).contains("sk-secret"));
    }
}
