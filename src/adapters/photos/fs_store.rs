//! Filesystem photo store.
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/<mission_id>/wp<waypoint>/img<image_index>_<timestamp>.jpg
//! <root>/<mission_id>/wp<waypoint>/pred_img<image_index>_<timestamp>.jpg
//! <root>/<mission_id>/wp<waypoint>/pred_dets_<image_index>.json
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::errors::PhotoStoreError;
use crate::domain::models::photo::validate_path_component;
use crate::domain::models::{MissionId, PhotoEntry, PredictionEntry};
use crate::domain::ports::PhotoStore;

const PRED_PREFIX: &str = "pred_";

pub struct FsPhotoStore {
    root: PathBuf,
}

impl FsPhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn waypoint_dir(&self, mission_id: &str, waypoint_folder: &str) -> Result<PathBuf, PhotoStoreError> {
        validate_path_component(mission_id)?;
        validate_path_component(waypoint_folder)?;
        Ok(self.root.join(mission_id).join(waypoint_folder))
    }

    /// Sorted entry names of `dir`; a missing directory is empty.
    async fn sorted_entries(dir: &Path, dirs: bool) -> Result<Vec<String>, PhotoStoreError> {
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() != dirs {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn read_detections(path: &Path) -> Vec<String> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read detections");
                return Vec::new();
            }
        };
        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "malformed detections file");
            Vec::new()
        })
    }
}

fn photo_url(mission_id: &MissionId, waypoint_folder: &str, filename: &str) -> String {
    format!("/photo/{mission_id}/{waypoint_folder}/{filename}")
}

fn photo_label(waypoint_folder: &str, filename: &str) -> String {
    format!("{waypoint_folder} · {filename}")
}

/// `pred_img3_20250101_120000.jpg` -> `3`
fn prediction_image_index(filename: &str) -> String {
    filename
        .strip_prefix(PRED_PREFIX)
        .and_then(|rest| rest.split('_').next())
        .and_then(|part| part.strip_prefix("img"))
        .unwrap_or("unknown")
        .to_string()
}

#[async_trait]
impl PhotoStore for FsPhotoStore {
    async fn save_image(
        &self,
        mission_id: &MissionId,
        waypoint_folder: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<(), PhotoStoreError> {
        validate_path_component(filename)?;
        let dir = self.waypoint_dir(mission_id.as_str(), waypoint_folder)?;
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(filename);
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), "image written");
        Ok(())
    }

    async fn save_detections(
        &self,
        mission_id: &MissionId,
        waypoint_folder: &str,
        image_index: &str,
        labels: &[String],
    ) -> Result<(), PhotoStoreError> {
        let filename = format!("{PRED_PREFIX}dets_{image_index}.json");
        validate_path_component(&filename)?;
        let dir = self.waypoint_dir(mission_id.as_str(), waypoint_folder)?;
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(filename);
        tokio::fs::write(&path, serde_json::to_vec(labels)?).await?;
        debug!(path = %path.display(), "detections written");
        Ok(())
    }

    async fn latest_photos(
        &self,
        mission_id: &MissionId,
        limit: usize,
    ) -> Result<Vec<PhotoEntry>, PhotoStoreError> {
        let mission_dir = self.root.join(mission_id.as_str());
        let mut photos = Vec::new();

        for waypoint in Self::sorted_entries(&mission_dir, true).await? {
            let files = Self::sorted_entries(&mission_dir.join(&waypoint), false).await?;
            let latest = files
                .iter()
                .rev()
                .find(|f| f.starts_with("img") && f.ends_with(".jpg"));
            if let Some(file) = latest {
                photos.push(PhotoEntry {
                    url: photo_url(mission_id, &waypoint, file),
                    label: photo_label(&waypoint, file),
                });
            }
        }

        let skip = photos.len().saturating_sub(limit);
        Ok(photos.split_off(skip))
    }

    async fn predictions(
        &self,
        mission_id: &MissionId,
    ) -> Result<Vec<PredictionEntry>, PhotoStoreError> {
        let mission_dir = self.root.join(mission_id.as_str());
        let mut photos = Vec::new();

        for waypoint in Self::sorted_entries(&mission_dir, true).await? {
            let waypoint_dir = mission_dir.join(&waypoint);
            let files = Self::sorted_entries(&waypoint_dir, false).await?;
            for file in files
                .iter()
                .filter(|f| f.starts_with(PRED_PREFIX) && f.ends_with(".jpg"))
            {
                let dets = waypoint_dir.join(format!(
                    "{PRED_PREFIX}dets_{}.json",
                    prediction_image_index(file)
                ));
                photos.push(PredictionEntry {
                    url: photo_url(mission_id, &waypoint, file),
                    label: photo_label(&waypoint, file.trim_start_matches(PRED_PREFIX)),
                    detections: Self::read_detections(&dets).await,
                });
            }
        }

        Ok(photos)
    }

    async fn read_photo(
        &self,
        mission_id: &str,
        waypoint_folder: &str,
        filename: &str,
    ) -> Result<Vec<u8>, PhotoStoreError> {
        validate_path_component(filename)?;
        let path = self.waypoint_dir(mission_id, waypoint_folder)?.join(filename);
        let display = format!("{mission_id}/{waypoint_folder}/{filename}");

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(PhotoStoreError::NotFound(display)),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mission() -> MissionId {
        MissionId::from("mission_20250101_000000_abc123")
    }

    #[test]
    fn test_prediction_image_index() {
        assert_eq!(prediction_image_index("pred_img3_20250101_120000.jpg"), "3");
        assert_eq!(prediction_image_index("pred_img12_x.jpg"), "12");
        assert_eq!(prediction_image_index("pred_photo.jpg"), "unknown");
    }

    #[tokio::test]
    async fn test_latest_photos_one_per_waypoint() {
        let dir = TempDir::new().unwrap();
        let store = FsPhotoStore::new(dir.path());
        let id = mission();

        store.save_image(&id, "wp1", "img0_20250101_000001.jpg", b"a").await.unwrap();
        store.save_image(&id, "wp1", "img1_20250101_000002.jpg", b"b").await.unwrap();
        store.save_image(&id, "wp2", "img0_20250101_000003.jpg", b"c").await.unwrap();
        store.save_image(&id, "wp2", "pred_img0_20250101_000003.jpg", b"c").await.unwrap();

        let photos = store.latest_photos(&id, 8).await.unwrap();
        assert_eq!(
            photos,
            vec![
                PhotoEntry {
                    url: format!("/photo/{id}/wp1/img1_20250101_000002.jpg"),
                    label: "wp1 · img1_20250101_000002.jpg".to_string(),
                },
                PhotoEntry {
                    url: format!("/photo/{id}/wp2/img0_20250101_000003.jpg"),
                    label: "wp2 · img0_20250101_000003.jpg".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_latest_photos_keeps_last_entries() {
        let dir = TempDir::new().unwrap();
        let store = FsPhotoStore::new(dir.path());
        let id = mission();
        for wp in 1..=4 {
            store
                .save_image(&id, &format!("wp{wp}"), "img0_t.jpg", b"x")
                .await
                .unwrap();
        }

        let photos = store.latest_photos(&id, 2).await.unwrap();
        let labels: Vec<&str> = photos.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["wp3 · img0_t.jpg", "wp4 · img0_t.jpg"]);
    }

    #[tokio::test]
    async fn test_predictions_with_detections() {
        let dir = TempDir::new().unwrap();
        let store = FsPhotoStore::new(dir.path());
        let id = mission();

        store.save_image(&id, "wp1", "pred_img2_t.jpg", b"x").await.unwrap();
        store
            .save_detections(&id, "wp1", "2", &["ripe".to_string()])
            .await
            .unwrap();
        store.save_image(&id, "wp1", "pred_img5_t.jpg", b"x").await.unwrap();

        let predictions = store.predictions(&id).await.unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].label, "wp1 · img2_t.jpg");
        assert_eq!(predictions[0].detections, vec!["ripe".to_string()]);
        assert!(predictions[1].detections.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_mission_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FsPhotoStore::new(dir.path());
        assert!(store.latest_photos(&mission(), 8).await.unwrap().is_empty());
        assert!(store.predictions(&mission()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_photo() {
        let dir = TempDir::new().unwrap();
        let store = FsPhotoStore::new(dir.path());
        let id = mission();
        store.save_image(&id, "wp1", "img0_t.jpg", b"jpeg").await.unwrap();

        let bytes = store.read_photo(id.as_str(), "wp1", "img0_t.jpg").await.unwrap();
        assert_eq!(bytes, b"jpeg");

        let err = store.read_photo(id.as_str(), "wp1", "missing.jpg").await.unwrap_err();
        assert!(matches!(err, PhotoStoreError::NotFound(_)));

        let err = store.read_photo(id.as_str(), "..", "img0_t.jpg").await.unwrap_err();
        assert!(matches!(err, PhotoStoreError::InvalidPathComponent(_)));
    }
}
