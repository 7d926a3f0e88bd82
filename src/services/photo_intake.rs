//! Photo intake: files robot photos under the current mission and runs
//! object detection on them.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::errors::PhotoStoreError;
use crate::domain::models::photo::validate_path_component;
use crate::domain::models::{
    MissionId, PhotoEntry, PhotoUpload, PredictionEntry, UploadReceipt,
};
use crate::domain::ports::{ObjectDetector, PhotoStore};
use crate::services::mission_control::MissionControl;

/// Default number of entries returned by [`PhotoIntakeService::latest_photos`].
pub const DEFAULT_LATEST_LIMIT: usize = 8;

/// Default minimum confidence for a detection label to be kept.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.5;

pub struct PhotoIntakeService {
    control: Arc<MissionControl>,
    store: Arc<dyn PhotoStore>,
    detector: Option<Arc<dyn ObjectDetector>>,
    min_confidence: f64,
    latest_limit: usize,
}

impl PhotoIntakeService {
    pub fn new(control: Arc<MissionControl>, store: Arc<dyn PhotoStore>) -> Self {
        Self {
            control,
            store,
            detector: None,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            latest_limit: DEFAULT_LATEST_LIMIT,
        }
    }

    pub fn with_detector(mut self, detector: Arc<dyn ObjectDetector>, min_confidence: f64) -> Self {
        self.detector = Some(detector);
        self.min_confidence = min_confidence;
        self
    }

    pub fn with_latest_limit(mut self, limit: usize) -> Self {
        self.latest_limit = limit;
        self
    }

    /// File a photo under the current mission, creating one if needed.
    ///
    /// The image counts against the mission before anything touches the
    /// store. Detection failures are logged and leave the receipt without
    /// labels.
    pub async fn upload(&self, upload: PhotoUpload) -> Result<UploadReceipt, PhotoStoreError> {
        let waypoint_folder = upload.waypoint_folder();
        let filename = format!(
            "img{}_{}.jpg",
            upload.image_index,
            Utc::now().format("%Y%m%d_%H%M%S")
        );
        validate_path_component(&waypoint_folder)?;
        validate_path_component(&filename)?;

        let mission_id = self.control.register_image();

        self.store
            .save_image(&mission_id, &waypoint_folder, &filename, &upload.bytes)
            .await?;
        info!(
            mission_id = %mission_id,
            waypoint = %waypoint_folder,
            filename = %filename,
            bytes = upload.bytes.len(),
            "photo saved"
        );

        let detections = match &self.detector {
            Some(detector) => {
                self.detect(detector.as_ref(), &mission_id, &waypoint_folder, &filename, &upload)
                    .await
            }
            None => Vec::new(),
        };

        Ok(UploadReceipt {
            mission_id,
            waypoint_folder,
            filename,
            detections,
        })
    }

    /// Run the detector and persist its output next to the raw photo.
    /// Failures are logged and yield no labels.
    async fn detect(
        &self,
        detector: &dyn ObjectDetector,
        mission_id: &MissionId,
        waypoint_folder: &str,
        filename: &str,
        upload: &PhotoUpload,
    ) -> Vec<String> {
        let outcome = match detector.detect(&upload.bytes).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(mission_id = %mission_id, filename = %filename, error = %e, "detection failed");
                return Vec::new();
            }
        };

        let labels = outcome.labels_above(self.min_confidence);
        if let Err(e) = self
            .save_predictions(mission_id, waypoint_folder, filename, upload, &labels)
            .await
        {
            warn!(mission_id = %mission_id, filename = %filename, error = %e, "saving detections failed");
            return Vec::new();
        }

        info!(
            mission_id = %mission_id,
            filename = %filename,
            labels = ?labels,
            "detections saved"
        );
        labels
    }

    async fn save_predictions(
        &self,
        mission_id: &MissionId,
        waypoint_folder: &str,
        filename: &str,
        upload: &PhotoUpload,
        labels: &[String],
    ) -> Result<(), PhotoStoreError> {
        self.store
            .save_image(
                mission_id,
                waypoint_folder,
                &format!("pred_{filename}"),
                &upload.bytes,
            )
            .await?;
        self.store
            .save_detections(mission_id, waypoint_folder, &upload.image_index, labels)
            .await
    }

    /// Latest raw photo per waypoint of the current mission.
    pub async fn latest_photos(&self) -> Result<Vec<PhotoEntry>, PhotoStoreError> {
        match self.control.current_mission_id() {
            Some(id) => self.store.latest_photos(&id, self.latest_limit).await,
            None => Ok(Vec::new()),
        }
    }

    /// Analysed photos of the current mission.
    pub async fn latest_predictions(&self) -> Result<Vec<PredictionEntry>, PhotoStoreError> {
        match self.control.current_mission_id() {
            Some(id) => self.store.predictions(&id).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn read_photo(
        &self,
        mission_id: &str,
        waypoint_folder: &str,
        filename: &str,
    ) -> Result<Vec<u8>, PhotoStoreError> {
        for component in [mission_id, waypoint_folder, filename] {
            validate_path_component(component)?;
        }
        self.store.read_photo(mission_id, waypoint_folder, filename).await
    }
}
