//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces the mission services use to reach their external
//! collaborators:
//! - PhotoStore: filing and listing mission photos
//! - ObjectDetector: labelling objects in a photo

pub mod object_detector;
pub mod photo_store;

pub use object_detector::ObjectDetector;
pub use photo_store::PhotoStore;
