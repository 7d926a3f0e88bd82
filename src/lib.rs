//! mission-relay - mission coordination between an operator and a robot
//!
//! The operator starts, aborts or recalls a mission; the robot polls for
//! those commands, posts telemetry and uploads photos. Mission state lives in
//! one place, [`MissionControl`], and every exchange goes through it.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Mission, command and telemetry models plus ports
//! - **Service Layer** (`services`): Mission lifecycle, command mailboxes, telemetry
//!   ingestion and photo intake
//! - **Adapters** (`adapters`): HTTP API, filesystem photo store, HTTP detector
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```
//! use mission_relay::{ControlCommand, MissionControl, MissionTrigger};
//!
//! let control = MissionControl::new();
//! let mission_id = control.start_mission();
//! assert_eq!(control.poll_mission_start(), MissionTrigger::Start);
//!
//! control.set_control_command(ControlCommand::Abort);
//! assert_eq!(control.poll_control_command(), Some(ControlCommand::Abort));
//! assert_eq!(control.poll_control_command(), None);
//!
//! control.ingest_status_report(br#"{"status": "mission_aborted_by_operator"}"#);
//! assert!(control.summarize(&mission_id).is_some());
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Config, ControlCommand, Mission, MissionId, MissionStatus, MissionSummary, MissionTrigger,
    StatusReport, TerminalStatus,
};
pub use domain::ports::{ObjectDetector, PhotoStore};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{MissionControl, PhotoIntakeService, StatusSnapshot};
