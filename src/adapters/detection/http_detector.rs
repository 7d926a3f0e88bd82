//! Object detection over HTTP.
//!
//! Posts the raw image to an external detection service and expects
//! `{"detections": [{"label": "...", "confidence": 0.9}]}` back.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use crate::domain::errors::DetectionError;
use crate::domain::models::{DetectionConfig, DetectionOutcome};
use crate::domain::ports::ObjectDetector;

pub struct HttpDetector {
    http_client: Client,
    endpoint: String,
}

impl HttpDetector {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, DetectionError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &DetectionConfig) -> Result<Self, DetectionError> {
        Self::new(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ObjectDetector for HttpDetector {
    async fn detect(&self, image: &[u8]) -> Result<DetectionOutcome, DetectionError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "image/jpeg")
            .body(image.to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DetectionError::Status(status.as_u16()));
        }

        let outcome: DetectionOutcome = response.json().await?;
        debug!(
            endpoint = %self.endpoint,
            detections = outcome.detections.len(),
            "detection response received"
        );
        Ok(outcome)
    }
}
