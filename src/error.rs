use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::store::StoreError;

#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    /// Maps a store failure onto a response, replacing database detail with
    /// `context` (e.g. "Failed to create class").
    pub fn from_store(err: StoreError, context: &str) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(format!("Class {id} not found")),
            other => {
                error!(error = %other, "{context}");
                ApiError::Internal(context.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(json!({ "error": msg }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        ApiError::from_store(value, "Database error")
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<minijinja::Error> for ApiError {
    fn from(value: minijinja::Error) -> Self {
        error!(error = %value, "template rendering failed");
        ApiError::Internal("Failed to render page".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err = ApiError::from_store(StoreError::NotFound("abc".into()), "Failed to update class");
        assert!(matches!(err, ApiError::NotFound(msg) if msg.contains("abc")));
    }

    #[test]
    fn test_store_failure_hides_detail() {
        let err = ApiError::from_store(
            StoreError::InvalidRow("bad day 9".into()),
            "Failed to fetch classes",
        );
        assert!(matches!(err, ApiError::Internal(msg) if msg == "Failed to fetch classes"));
    }

    #[test]
    fn test_error_body_is_json() {
        let response = ApiError::BadRequest("duration must be between 15 and 180".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );
    }
}
