//! Telemetry ingestion.
//!
//! Turns whatever the robot posted into a [`StatusReport`], records it as the
//! process-wide "last status" and hands it to the lifecycle manager. Bad
//! telemetry never fails the exchange: undecodable payloads become a
//! `bad_status_payload` report.

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::domain::models::{MissionId, ReportKind, StatusReport, NO_MISSION_ID};
use crate::services::command_dispatcher::CommandDispatcher;
use crate::services::mission_lifecycle::MissionLifecycleManager;

#[derive(Debug, Default)]
pub struct StatusReportProcessor {
    last_report: Option<StatusReport>,
}

impl StatusReportProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a raw request body.
    ///
    /// An empty body or JSON `null` is an empty report; bytes that are not
    /// JSON, or JSON that is not an object, become `bad_status_payload`.
    pub fn normalize(raw: &[u8]) -> StatusReport {
        if raw.iter().all(u8::is_ascii_whitespace) {
            return StatusReport::from_fields(Map::new());
        }
        match serde_json::from_slice::<Value>(raw) {
            Ok(Value::Object(fields)) => StatusReport::from_fields(fields),
            Ok(Value::Null) => StatusReport::from_fields(Map::new()),
            Ok(other) => {
                warn!(payload = %other, "status payload is not an object");
                StatusReport::bad_payload()
            }
            Err(e) => {
                warn!(error = %e, "status payload is not valid JSON");
                StatusReport::bad_payload()
            }
        }
    }

    /// Ingest a raw payload. See [`Self::ingest_report`].
    pub fn ingest(
        &mut self,
        raw: &[u8],
        lifecycle: &mut MissionLifecycleManager,
        dispatcher: &mut CommandDispatcher,
    ) {
        self.ingest_report(Self::normalize(raw), lifecycle, dispatcher);
    }

    /// Record `report` as the last status and apply it to the current
    /// mission.
    ///
    /// `mission_idle` drops a pending start trigger. `mission_state` and
    /// `mission_id` are filled in when the robot did not send them.
    pub fn ingest_report(
        &mut self,
        mut report: StatusReport,
        lifecycle: &mut MissionLifecycleManager,
        dispatcher: &mut CommandDispatcher,
    ) {
        if *report.kind() == ReportKind::MissionIdle {
            dispatcher.force_idle();
        }

        report.set_default("mission_state", dispatcher.mission_trigger().as_str());
        report.set_default(
            "mission_id",
            lifecycle
                .current_mission_id()
                .map_or(NO_MISSION_ID, MissionId::as_str),
        );

        let fields = Value::Object(report.fields().clone());
        info!(
            status = %report.status(),
            fields = %fields,
            "status report received"
        );

        lifecycle.apply_status_report(&report);
        self.last_report = Some(report);
    }

    /// Reflect an operator-started mission in the last status: the mission
    /// id is replaced and a missing status defaults to `mission_idle`.
    pub fn note_mission_started(&mut self, mission_id: &MissionId) {
        let report = self
            .last_report
            .get_or_insert_with(|| StatusReport::with_status("mission_idle"));
        if report.get("status").is_none() {
            report.insert("status", "mission_idle");
        }
        report.insert("mission_id", mission_id.as_str());
    }

    pub fn last_report(&self) -> Option<&StatusReport> {
        self.last_report.as_ref()
    }
}
