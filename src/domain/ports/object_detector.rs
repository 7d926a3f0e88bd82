use async_trait::async_trait;

use crate::domain::errors::DetectionError;
use crate::domain::models::DetectionOutcome;

/// External object detection capability.
///
/// Takes an encoded image and returns labelled detections. How the model
/// runs is the implementor's business.
#[async_trait]
pub trait ObjectDetector: Send + Sync {
    async fn detect(&self, image: &[u8]) -> Result<DetectionOutcome, DetectionError>;
}
