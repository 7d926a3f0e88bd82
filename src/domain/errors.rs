//! Domain errors for the collaborators around the mission core.
//!
//! The mission core itself never fails; these cover photo storage and the
//! external detection service.

use thiserror::Error;

/// Errors raised while filing or reading photos.
#[derive(Debug, Error)]
pub enum PhotoStoreError {
    #[error("Invalid path component: {0:?}")]
    InvalidPathComponent(String),

    #[error("Photo not found: {0}")]
    NotFound(String),

    #[error("Photo storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised by the object detection collaborator.
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("Detection request failed: {0}")]
    Request(String),

    #[error("Detection service returned status {0}")]
    Status(u16),

    #[error("Invalid detection response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for DetectionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DetectionError::InvalidResponse(err.to_string())
        } else {
            DetectionError::Request(err.to_string())
        }
    }
}
