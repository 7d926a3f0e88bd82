//! Telemetry reports pushed by the robot.
//!
//! Reports are loosely structured JSON objects. The `status` field drives the
//! mission state machine and is decoded into [`ReportKind`]; every other
//! field is kept verbatim for diagnostics and the dashboard.

use serde::Serialize;
use serde_json::{Map, Value};

use super::mission::TerminalStatus;

/// Status substituted for payloads that could not be decoded.
pub const BAD_STATUS_PAYLOAD: &str = "bad_status_payload";

/// Placeholder mission id shown when no mission is current.
pub const NO_MISSION_ID: &str = "—";

/// Decoded `status` tag of a telemetry report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportKind {
    MissionStarted,
    MissionIdle,
    /// Waypoint reached; `None` when the report carried no usable index
    WaypointReached(Option<i64>),
    WaypointUnreachable(Option<i64>),
    MissionComplete,
    MissionCompleteAfterAbort,
    /// Any status starting with `home_unreachable`; keeps the full text
    HomeUnreachable(String),
    MissionAbortedByOperator,
    BadPayload,
    Unknown(String),
}

impl ReportKind {
    /// Decode a status string. `index` is only consulted for waypoint events.
    pub fn classify(status: &str, index: Option<i64>) -> Self {
        match status {
            "mission_started" => Self::MissionStarted,
            "mission_idle" => Self::MissionIdle,
            "waypoint_reached" => Self::WaypointReached(index),
            "waypoint_unreachable" => Self::WaypointUnreachable(index),
            "mission_complete" => Self::MissionComplete,
            "mission_complete_after_abort" => Self::MissionCompleteAfterAbort,
            "mission_aborted_by_operator" => Self::MissionAbortedByOperator,
            BAD_STATUS_PAYLOAD => Self::BadPayload,
            s if s.starts_with("home_unreachable") => Self::HomeUnreachable(s.to_string()),
            s => Self::Unknown(s.to_string()),
        }
    }

    /// Terminal outcome this report ends a mission with, if any.
    pub fn terminal_outcome(&self) -> Option<TerminalStatus> {
        match self {
            Self::MissionComplete | Self::MissionCompleteAfterAbort => {
                Some(TerminalStatus::MissionComplete)
            }
            Self::HomeUnreachable(_) => Some(TerminalStatus::HomeUnreachable),
            Self::MissionAbortedByOperator => Some(TerminalStatus::MissionAbortedByOperator),
            _ => None,
        }
    }
}

/// One telemetry report: the decoded status plus the raw key-value payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    #[serde(skip)]
    kind: ReportKind,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl StatusReport {
    /// Build a report from a decoded JSON object.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        let status = fields.get("status").map(status_text).unwrap_or_default();
        let index = fields.get("index").and_then(waypoint_index);
        Self {
            kind: ReportKind::classify(&status, index),
            fields,
        }
    }

    /// A report carrying nothing but `status`.
    pub fn with_status(status: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("status".to_string(), Value::String(status.to_string()));
        Self::from_fields(fields)
    }

    /// Sentinel report for undecodable payloads.
    pub fn bad_payload() -> Self {
        Self::with_status(BAD_STATUS_PAYLOAD)
    }

    pub fn kind(&self) -> &ReportKind {
        &self.kind
    }

    /// Raw status text; empty when the payload had none.
    pub fn status(&self) -> String {
        self.fields.get("status").map(status_text).unwrap_or_default()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Insert `key` only when absent.
    pub fn set_default(&mut self, key: &str, value: impl Into<Value>) {
        self.fields
            .entry(key.to_string())
            .or_insert_with(|| value.into());
    }

    /// Overwrite `key`. The decoded kind is refreshed when `status` or
    /// `index` change.
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
        if key == "status" || key == "index" {
            let fields = std::mem::take(&mut self.fields);
            *self = Self::from_fields(fields);
        }
    }
}

/// Text of a JSON value used as a status: strings verbatim, anything else
/// as its JSON rendering.
pub fn status_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Waypoint index from an integer, a float (truncated) or a numeric string.
fn waypoint_index(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < 9.0e15)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
