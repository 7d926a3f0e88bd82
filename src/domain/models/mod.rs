pub mod command;
pub mod config;
pub mod mission;
pub mod photo;
pub mod telemetry;

pub use command::{ControlCommand, MissionTrigger};
pub use config::{
    Config, DetectionConfig, LogFormat, LoggingConfig, PhotoConfig, RotationPolicy, ServerConfig,
};
pub use mission::{Mission, MissionId, MissionStatus, MissionSummary, TerminalStatus};
pub use photo::{
    Detection, DetectionOutcome, PhotoEntry, PhotoUpload, PredictionEntry, UploadReceipt,
};
pub use telemetry::{ReportKind, StatusReport, BAD_STATUS_PAYLOAD, NO_MISSION_ID};
