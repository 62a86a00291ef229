use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::StoreError;
use thiserror::Error;
use tracing::error;

/// JSON API error: status code plus `{ "error": …, "detail": … }` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(detail.into()))
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(detail.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.title, "detail": self.detail });
        (self.status, Json(body)).into_response()
    }
}

/// Store failure taxonomy → HTTP status. Unknown student and unknown course
/// both collapse to 404 at this boundary.
impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(_) => {
                Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string()))
            }
            StoreError::StudentNotFound(_) | StoreError::CourseNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string()))
            }
            StoreError::DuplicateGrade { .. } => {
                Self::new(StatusCode::CONFLICT, "Conflict", Some(e.to_string()))
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

impl IntoResponse for StartupError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let msg = self.to_string();
        error!(error = %msg, "startup error");
        (status, Json(serde_json::json!({"error": msg}))).into_response()
    }
}
