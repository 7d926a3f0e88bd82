//! Read-only dashboard views over the mission state.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::models::telemetry::status_text;
use crate::domain::models::{MissionId, MissionSummary, TerminalStatus, NO_MISSION_ID};
use crate::services::command_dispatcher::CommandDispatcher;
use crate::services::mission_lifecycle::MissionLifecycleManager;
use crate::services::status_processor::StatusReportProcessor;

/// Status shown before the robot has reported anything.
pub const NO_STATUS_YET: &str = "no_status_yet";

/// What the robot last said, merged with the server-side mission state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    pub status: String,
    pub mission_state: String,
    pub mission_id: String,
    pub terminal_status: Option<TerminalStatus>,
    /// Remaining fields of the last report, e.g. `index`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const SNAPSHOT_KEYS: [&str; 4] = ["status", "mission_state", "mission_id", "terminal_status"];

/// Borrowed view over the state owned by `MissionControl`. Never mutates.
pub struct MissionQueryService<'a> {
    lifecycle: &'a MissionLifecycleManager,
    dispatcher: &'a CommandDispatcher,
    reports: &'a StatusReportProcessor,
}

impl<'a> MissionQueryService<'a> {
    pub fn new(
        lifecycle: &'a MissionLifecycleManager,
        dispatcher: &'a CommandDispatcher,
        reports: &'a StatusReportProcessor,
    ) -> Self {
        Self {
            lifecycle,
            dispatcher,
            reports,
        }
    }

    /// Last report with `mission_state` / `mission_id` falling back to the
    /// live values and `terminal_status` always live.
    pub fn current_status_snapshot(&self) -> StatusSnapshot {
        let live_state = self.dispatcher.mission_trigger().as_str().to_string();
        let live_id = self
            .lifecycle
            .current_mission_id()
            .map_or(NO_MISSION_ID, MissionId::as_str)
            .to_string();
        let terminal_status = self.lifecycle.terminal_status();

        let Some(report) = self.reports.last_report() else {
            return StatusSnapshot {
                status: NO_STATUS_YET.to_string(),
                mission_state: live_state,
                mission_id: live_id,
                terminal_status,
                extra: Map::new(),
            };
        };

        let extra = report
            .fields()
            .iter()
            .filter(|(key, _)| !SNAPSHOT_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        StatusSnapshot {
            status: report.status(),
            mission_state: report.get("mission_state").map_or(live_state, status_text),
            mission_id: report.get("mission_id").map_or(live_id, status_text),
            terminal_status,
            extra,
        }
    }

    /// Summaries of every mission, most recently started first.
    pub fn list_missions(&self) -> Vec<MissionSummary> {
        self.lifecycle
            .missions_newest_first()
            .into_iter()
            .map(|mission| mission.summary())
            .collect()
    }

    pub fn summarize(&self, id: &MissionId) -> Option<MissionSummary> {
        self.lifecycle.summarize(id)
    }
}
