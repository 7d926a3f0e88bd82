use async_trait::async_trait;

use crate::domain::errors::PhotoStoreError;
use crate::domain::models::{MissionId, PhotoEntry, PredictionEntry};

/// Storage for mission photos and their detection results.
///
/// Photos are keyed by mission id, waypoint folder (`wp<index>`) and file
/// name. Raw photos are named `img<image_index>_<timestamp>.jpg`; analysed
/// copies carry a `pred_` prefix and their labels live next to them.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Write `bytes` as `<mission>/<waypoint_folder>/<filename>`.
    async fn save_image(
        &self,
        mission_id: &MissionId,
        waypoint_folder: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<(), PhotoStoreError>;

    /// Record the labels detected in image `image_index` of a waypoint.
    async fn save_detections(
        &self,
        mission_id: &MissionId,
        waypoint_folder: &str,
        image_index: &str,
        labels: &[String],
    ) -> Result<(), PhotoStoreError>;

    /// Latest raw photo per waypoint, waypoint folders in name order,
    /// truncated to the last `limit` entries.
    async fn latest_photos(
        &self,
        mission_id: &MissionId,
        limit: usize,
    ) -> Result<Vec<PhotoEntry>, PhotoStoreError>;

    /// Every analysed photo of the mission with its labels.
    async fn predictions(&self, mission_id: &MissionId)
        -> Result<Vec<PredictionEntry>, PhotoStoreError>;

    /// Raw bytes of a stored photo.
    async fn read_photo(
        &self,
        mission_id: &str,
        waypoint_folder: &str,
        filename: &str,
    ) -> Result<Vec<u8>, PhotoStoreError>;
}
