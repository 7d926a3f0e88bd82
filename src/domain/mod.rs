//! Domain layer for mission-relay
//!
//! Mission, command and telemetry models plus the ports the mission core
//! uses to reach photo storage and object detection.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DetectionError, PhotoStoreError};
