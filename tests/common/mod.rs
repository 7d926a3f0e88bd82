//! Common test utilities for integration tests
//!
//! Shared fixtures for the mission relay integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use mission_relay::adapters::http::{AppState, MissionHttpServer};
use mission_relay::adapters::photos::FsPhotoStore;
use mission_relay::domain::errors::DetectionError;
use mission_relay::domain::models::{Detection, DetectionOutcome, ServerConfig};
use mission_relay::{MissionControl, ObjectDetector, PhotoIntakeService};
use serde_json::Value;
use tempfile::TempDir;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Detector returning a fixed set of detections.
pub struct StaticDetector {
    pub detections: Vec<(String, f64)>,
}

impl StaticDetector {
    pub fn new(detections: &[(&str, f64)]) -> Self {
        Self {
            detections: detections
                .iter()
                .map(|(label, confidence)| (label.to_string(), *confidence))
                .collect(),
        }
    }
}

#[async_trait]
impl ObjectDetector for StaticDetector {
    async fn detect(&self, _image: &[u8]) -> Result<DetectionOutcome, DetectionError> {
        Ok(DetectionOutcome {
            detections: self
                .detections
                .iter()
                .map(|(label, confidence)| Detection {
                    label: label.clone(),
                    confidence: *confidence,
                })
                .collect(),
        })
    }
}

/// A full application wired against a temporary photo root.
pub struct TestApp {
    pub dir: TempDir,
    pub control: Arc<MissionControl>,
    pub server: MissionHttpServer,
}

pub fn test_app(detector: Option<Arc<dyn ObjectDetector>>) -> TestApp {
    setup_test_logging();
    let dir = temp_dir();
    let control = Arc::new(MissionControl::new());
    let store = Arc::new(FsPhotoStore::new(dir.path()));

    let mut photos = PhotoIntakeService::new(control.clone(), store);
    if let Some(detector) = detector {
        photos = photos.with_detector(detector, 0.5);
    }

    let server = MissionHttpServer::new(
        AppState::new(control.clone(), photos),
        ServerConfig::default(),
    );
    TestApp {
        dir,
        control,
        server,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(body.into())
        .unwrap()
}

pub const BOUNDARY: &str = "mission-relay-test-boundary";

/// Multipart upload request. `fields` are text fields, `image` the file part.
pub fn multipart_upload(fields: &[(&str, &str)], image: Option<&[u8]>) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(image) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"photo.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(image);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload_photo")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Body should be JSON")
}
