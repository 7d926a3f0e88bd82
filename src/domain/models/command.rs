//! Operator-to-robot signals.
//!
//! The robot cannot receive pushes, so both signals are latched until the
//! robot's next poll.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mission-start trigger as seen by the robot's polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionTrigger {
    #[default]
    Idle,
    Start,
}

impl MissionTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Start => "start",
        }
    }
}

impl fmt::Display for MissionTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Control command issued by the operator while a mission runs.
///
/// An empty command slot is `None` at the type level and `"none"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlCommand {
    Abort,
    GoHome,
}

impl ControlCommand {
    /// Wire value of a slot that may be empty.
    pub const NONE: &'static str = "none";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::GoHome => "go_home",
        }
    }

    /// Wire value for a polled slot.
    pub fn wire_value(command: Option<Self>) -> &'static str {
        command.map_or(Self::NONE, |cmd| cmd.as_str())
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_defaults_to_idle() {
        assert_eq!(MissionTrigger::default(), MissionTrigger::Idle);
        assert_eq!(MissionTrigger::Start.as_str(), "start");
    }

    #[test]
    fn test_wire_value() {
        assert_eq!(ControlCommand::wire_value(None), "none");
        assert_eq!(ControlCommand::wire_value(Some(ControlCommand::GoHome)), "go_home");
        assert_eq!(
            serde_json::to_value(ControlCommand::GoHome).unwrap(),
            serde_json::json!("go_home")
        );
    }
}
