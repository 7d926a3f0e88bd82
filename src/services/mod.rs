pub mod command_dispatcher;
pub mod mailbox;
pub mod mission_control;
pub mod mission_lifecycle;
pub mod mission_query;
pub mod photo_intake;
pub mod status_processor;

pub use command_dispatcher::CommandDispatcher;
pub use mailbox::OneShot;
pub use mission_control::MissionControl;
pub use mission_lifecycle::MissionLifecycleManager;
pub use mission_query::{MissionQueryService, StatusSnapshot, NO_STATUS_YET};
pub use photo_intake::PhotoIntakeService;
pub use status_processor::StatusReportProcessor;
