//! Mission control: the single owner of mission, command and telemetry state.
//!
//! Every public operation takes the one lock for its whole read-modify-write,
//! so operator actions, robot polls and telemetry are applied in
//! lock-acquisition order and never interleave. Nothing in here awaits or
//! does I/O while the lock is held.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::domain::models::{
    ControlCommand, MissionId, MissionSummary, MissionTrigger, TerminalStatus,
};
use crate::services::command_dispatcher::CommandDispatcher;
use crate::services::mission_lifecycle::MissionLifecycleManager;
use crate::services::mission_query::{MissionQueryService, StatusSnapshot};
use crate::services::status_processor::StatusReportProcessor;

#[derive(Debug, Default)]
struct ControlState {
    lifecycle: MissionLifecycleManager,
    dispatcher: CommandDispatcher,
    reports: StatusReportProcessor,
}

impl ControlState {
    fn query(&self) -> MissionQueryService<'_> {
        MissionQueryService::new(&self.lifecycle, &self.dispatcher, &self.reports)
    }
}

/// Shared handle for request handlers; wrap in an `Arc`.
#[derive(Debug, Default)]
pub struct MissionControl {
    state: Mutex<ControlState>,
}

impl MissionControl {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ControlState> {
        // No operation panics mid-update, so a poisoned guard is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Operator start: create a mission, latch the start trigger for the
    /// robot and point the last status at the new mission.
    pub fn start_mission(&self) -> MissionId {
        let mut state = self.lock();
        let state = &mut *state;
        state.dispatcher.trigger_mission_start();
        let id = state.lifecycle.start_mission();
        state.reports.note_mission_started(&id);
        info!(mission_id = %id, "mission started by operator");
        id
    }

    pub fn trigger_mission_start(&self) {
        self.lock().dispatcher.trigger_mission_start();
    }

    pub fn poll_mission_start(&self) -> MissionTrigger {
        self.lock().dispatcher.poll_mission_start()
    }

    pub fn set_control_command(&self, command: ControlCommand) {
        self.lock().dispatcher.set_control_command(command);
    }

    pub fn poll_control_command(&self) -> Option<ControlCommand> {
        self.lock().dispatcher.poll_control_command()
    }

    /// Ingest a raw telemetry body. Never fails.
    pub fn ingest_status_report(&self, raw: &[u8]) {
        let mut state = self.lock();
        let state = &mut *state;
        state
            .reports
            .ingest(raw, &mut state.lifecycle, &mut state.dispatcher);
    }

    pub fn current_status_snapshot(&self) -> StatusSnapshot {
        self.lock().query().current_status_snapshot()
    }

    pub fn list_missions(&self) -> Vec<MissionSummary> {
        self.lock().query().list_missions()
    }

    pub fn summarize(&self, id: &MissionId) -> Option<MissionSummary> {
        self.lock().query().summarize(id)
    }

    /// Count a photo against the current mission (created if absent) and
    /// return the id to file it under.
    pub fn register_image(&self) -> MissionId {
        self.lock().lifecycle.register_image()
    }

    pub fn current_mission_id(&self) -> Option<MissionId> {
        self.lock().lifecycle.current_mission_id().cloned()
    }

    pub fn terminal_status(&self) -> Option<TerminalStatus> {
        self.lock().lifecycle.terminal_status()
    }
}
