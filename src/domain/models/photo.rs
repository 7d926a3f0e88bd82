//! Photo and detection records exchanged with the storage and detection
//! collaborators.

use serde::{Deserialize, Serialize};

use super::mission::MissionId;
use crate::domain::errors::PhotoStoreError;

/// A photo received from the robot, before it is filed.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    /// Waypoint the photo was taken at, as sent by the robot
    pub waypoint_index: String,
    /// Per-waypoint image counter, as sent by the robot
    pub image_index: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    pub fn waypoint_folder(&self) -> String {
        format!("wp{}", self.waypoint_index)
    }
}

/// Where an uploaded photo was filed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub mission_id: MissionId,
    pub waypoint_folder: String,
    pub filename: String,
    /// Labels found by the detector; empty when detection did not run
    pub detections: Vec<String>,
}

/// Latest raw photo of one waypoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoEntry {
    pub url: String,
    pub label: String,
}

/// An analysed photo and the labels detected in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionEntry {
    pub url: String,
    pub label: String,
    pub detections: Vec<String>,
}

/// One labelled detection returned by the detection service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    pub confidence: f64,
}

/// Result of running detection on one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionOutcome {
    #[serde(default)]
    pub detections: Vec<Detection>,
}

impl DetectionOutcome {
    /// Distinct labels at or above `min_confidence`, sorted.
    pub fn labels_above(&self, min_confidence: f64) -> Vec<String> {
        let mut labels: Vec<String> = self
            .detections
            .iter()
            .filter(|d| d.confidence >= min_confidence)
            .map(|d| d.label.clone())
            .collect();
        labels.sort();
        labels.dedup();
        labels
    }
}

/// Reject anything that could escape the photo root when joined as a path.
pub fn validate_path_component(component: &str) -> Result<(), PhotoStoreError> {
    let unsafe_component = component.is_empty()
        || component == "."
        || component == ".."
        || component.contains(['/', '\\', '\0']);
    if unsafe_component {
        return Err(PhotoStoreError::InvalidPathComponent(component.to_string()));
    }
    Ok(())
}
