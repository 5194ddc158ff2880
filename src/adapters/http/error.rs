use crate::utils::error::ScanApiError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by HTTP handlers, rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, "request failed: {}", self.message);
        } else {
            tracing::debug!(status = %self.status, "request rejected: {}", self.message);
        }

        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<ScanApiError> for ApiError {
    fn from(err: ScanApiError) -> Self {
        let status = match &err {
            ScanApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ScanApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ScanApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ScanApiError::Forbidden => StatusCode::FORBIDDEN,
            ScanApiError::ConfigError { .. }
            | ScanApiError::InvalidConfigValueError { .. }
            | ScanApiError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            Self::internal(err.to_string())
        } else {
            Self::new(status, err.client_message())
        }
    }
}
