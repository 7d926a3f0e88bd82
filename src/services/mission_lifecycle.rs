//! Mission lifecycle management.
//!
//! Owns the mission registry: creation, status transitions driven by
//! telemetry, image registration and terminal-outcome classification.
//!
//! Per mission: `pending -> running -> {complete, home_unreachable, aborted}`.
//! Waypoint events loop on `running`. A terminal mission never transitions
//! again; a new mission has to be started.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::domain::models::{
    Mission, MissionId, MissionSummary, ReportKind, StatusReport, TerminalStatus,
};

#[derive(Debug, Default)]
pub struct MissionLifecycleManager {
    missions: HashMap<MissionId, Mission>,
    /// Insertion order, oldest first
    order: Vec<MissionId>,
    current: Option<MissionId>,
    terminal: Option<TerminalStatus>,
}

impl MissionLifecycleManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pending mission, make it current and clear the terminal
    /// status.
    pub fn start_mission(&mut self) -> MissionId {
        self.start_mission_at(Utc::now())
    }

    pub(crate) fn start_mission_at(&mut self, now: DateTime<Utc>) -> MissionId {
        let mut id = MissionId::generate(now);
        while self.missions.contains_key(&id) {
            id = MissionId::generate(now);
        }

        self.missions.insert(id.clone(), Mission::new(id.clone(), now));
        self.order.push(id.clone());
        self.current = Some(id.clone());
        self.terminal = None;

        info!(mission_id = %id, "new mission created");
        id
    }

    /// Current mission id, creating a mission if there is none.
    pub fn ensure_current_mission(&mut self) -> MissionId {
        match &self.current {
            Some(id) => id.clone(),
            None => self.start_mission(),
        }
    }

    /// Fold one telemetry report into the current mission.
    ///
    /// Without a current mission only `mission_started` is applied (it
    /// creates one); anything else is dropped.
    pub fn apply_status_report(&mut self, report: &StatusReport) {
        let id = match (&self.current, report.kind()) {
            (Some(id), _) => id.clone(),
            (None, ReportKind::MissionStarted) => self.start_mission(),
            (None, _) => {
                debug!(status = %report.status(), "no current mission, status report dropped");
                return;
            }
        };

        let Some(mission) = self.missions.get_mut(&id) else {
            return;
        };
        mission.last_status = Some(report.clone());

        let mut finished = None;
        match report.kind() {
            ReportKind::MissionStarted => {
                if mission.mark_running() {
                    info!(mission_id = %id, "mission running");
                } else {
                    warn!(
                        mission_id = %id,
                        status = %mission.status,
                        "mission_started for a finished mission ignored"
                    );
                }
            }
            ReportKind::WaypointReached(Some(index)) => {
                mission.record_waypoint_reached(*index);
                debug!(mission_id = %id, index, "waypoint reached");
            }
            ReportKind::WaypointUnreachable(Some(index)) => {
                mission.record_waypoint_unreachable(*index);
                debug!(mission_id = %id, index, "waypoint unreachable");
            }
            ReportKind::WaypointReached(None) | ReportKind::WaypointUnreachable(None) => {
                warn!(
                    mission_id = %id,
                    status = %report.status(),
                    "waypoint report without a usable index"
                );
            }
            kind => {
                if let Some(outcome) = kind.terminal_outcome() {
                    if mission.finish(outcome, Utc::now()) {
                        finished = Some(outcome);
                    } else {
                        warn!(
                            mission_id = %id,
                            status = %mission.status,
                            outcome = outcome.as_str(),
                            "terminal report for a finished mission ignored"
                        );
                    }
                }
            }
        }

        if let Some(outcome) = finished {
            self.terminal = Some(outcome);
            info!(mission_id = %id, outcome = outcome.as_str(), "mission ended");
        }
    }

    /// Count a photo against the current mission, creating one if needed.
    /// Returns the id the photo should be filed under.
    pub fn register_image(&mut self) -> MissionId {
        let id = self.ensure_current_mission();
        if let Some(mission) = self.missions.get_mut(&id) {
            mission.record_image();
            debug!(mission_id = %id, images = mission.images_count, "image registered");
        }
        id
    }

    pub fn summarize(&self, id: &MissionId) -> Option<MissionSummary> {
        self.missions.get(id).map(Mission::summary)
    }

    pub fn mission(&self, id: &MissionId) -> Option<&Mission> {
        self.missions.get(id)
    }

    pub fn current_mission_id(&self) -> Option<&MissionId> {
        self.current.as_ref()
    }

    pub fn current_mission(&self) -> Option<&Mission> {
        self.current.as_ref().and_then(|id| self.missions.get(id))
    }

    pub fn terminal_status(&self) -> Option<TerminalStatus> {
        self.terminal
    }

    /// All missions, most recently started first. Missions started at the
    /// same instant keep reverse insertion order.
    pub fn missions_newest_first(&self) -> Vec<&Mission> {
        let mut missions: Vec<&Mission> = self
            .order
            .iter()
            .rev()
            .filter_map(|id| self.missions.get(id))
            .collect();
        missions.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        missions
    }
}
