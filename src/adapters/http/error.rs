use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::error;

use crate::domain::errors::PhotoStoreError;

/// Error body: `{"status": "error", "message": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

/// Handler error carrying the HTTP status to answer with.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<PhotoStoreError> for ApiError {
    fn from(err: PhotoStoreError) -> Self {
        match err {
            PhotoStoreError::InvalidPathComponent(_) => Self::bad_request(err.to_string()),
            PhotoStoreError::NotFound(_) => Self::not_found(err.to_string()),
            PhotoStoreError::Io(_) | PhotoStoreError::Serialization(_) => {
                error!(error = %err, "photo storage failed");
                Self::internal(err.to_string())
            }
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::bad_request(err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                status: "error",
                message: self.message,
            }),
        )
            .into_response()
    }
}
