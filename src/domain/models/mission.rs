//! Mission domain model.
//!
//! A mission is one run of the robot across its waypoints, from the start
//! trigger to a terminal outcome. Missions are never deleted; a finished
//! mission stays in the registry as history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

use super::telemetry::StatusReport;

/// Opaque mission identifier, e.g. `mission_20251210_123456_ABCD12`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionId(String);

impl MissionId {
    /// Generate a fresh identifier stamped with `now`.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let suffix = Uuid::new_v4().simple().to_string()[..6].to_uppercase();
        Self(format!("mission_{}_{}", now.format("%Y%m%d_%H%M%S"), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for MissionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for MissionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Lifecycle status of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    /// Created, no activity seen yet
    #[default]
    Pending,
    /// Robot reported the start or uploaded a photo
    Running,
    /// Robot finished the route
    Complete,
    /// Robot could not make it back home
    HomeUnreachable,
    /// Operator aborted the mission
    Aborted,
}

impl MissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Complete => "complete",
            Self::HomeUnreachable => "home_unreachable",
            Self::Aborted => "aborted",
        }
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::HomeUnreachable | Self::Aborted)
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the most recent mission ended.
///
/// The process-wide value is an `Option<TerminalStatus>`: `None` until a
/// mission ends, and reset to `None` whenever a new mission starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalStatus {
    MissionComplete,
    HomeUnreachable,
    MissionAbortedByOperator,
}

impl TerminalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissionComplete => "mission_complete",
            Self::HomeUnreachable => "home_unreachable",
            Self::MissionAbortedByOperator => "mission_aborted_by_operator",
        }
    }

    /// Mission status a mission ends in for this outcome.
    pub fn mission_status(&self) -> MissionStatus {
        match self {
            Self::MissionComplete => MissionStatus::Complete,
            Self::HomeUnreachable => MissionStatus::HomeUnreachable,
            Self::MissionAbortedByOperator => MissionStatus::Aborted,
        }
    }
}

/// A single mission and its accumulated progress.
#[derive(Debug, Clone)]
pub struct Mission {
    pub id: MissionId,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub status: MissionStatus,
    pub waypoints_reached: HashSet<i64>,
    pub waypoints_unreachable: HashSet<i64>,
    pub images_count: u64,
    /// Most recent telemetry report applied to this mission
    pub last_status: Option<StatusReport>,
}

impl Mission {
    pub fn new(id: MissionId, started_at: DateTime<Utc>) -> Self {
        Self {
            id,
            started_at,
            ended_at: None,
            status: MissionStatus::Pending,
            waypoints_reached: HashSet::new(),
            waypoints_unreachable: HashSet::new(),
            images_count: 0,
            last_status: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Move to `running`. Returns false if the mission already ended.
    pub fn mark_running(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.status = MissionStatus::Running;
        true
    }

    pub fn record_waypoint_reached(&mut self, index: i64) {
        self.waypoints_reached.insert(index);
    }

    pub fn record_waypoint_unreachable(&mut self, index: i64) {
        self.waypoints_unreachable.insert(index);
    }

    /// Count a registered photo. A photo implies activity, so a pending
    /// mission advances to `running`.
    pub fn record_image(&mut self) {
        self.images_count += 1;
        if self.status == MissionStatus::Pending {
            self.status = MissionStatus::Running;
        }
    }

    /// End the mission with `outcome`. Returns false if it had already ended,
    /// in which case nothing changes.
    pub fn finish(&mut self, outcome: TerminalStatus, now: DateTime<Utc>) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.status = outcome.mission_status();
        self.ended_at = Some(now);
        true
    }

    pub fn summary(&self) -> MissionSummary {
        MissionSummary {
            id: self.id.clone(),
            started_at: self.started_at,
            ended_at: self.ended_at,
            status: self.status,
            waypoints_reached: sorted(&self.waypoints_reached),
            waypoints_unreachable: sorted(&self.waypoints_unreachable),
            images_count: self.images_count,
        }
    }
}

fn sorted(indices: &HashSet<i64>) -> Vec<i64> {
    let mut list: Vec<i64> = indices.iter().copied().collect();
    list.sort_unstable();
    list
}

/// Read-only projection of a mission for dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionSummary {
    pub id: MissionId,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub status: MissionStatus,
    pub waypoints_reached: Vec<i64>,
    pub waypoints_unreachable: Vec<i64>,
    pub images_count: u64,
}
