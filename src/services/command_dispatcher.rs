//! Operator-to-robot command channel.
//!
//! Holds the mission-start trigger and the control command slot. Both are
//! one-shot mailboxes: the robot discovers them by polling, and a poll that
//! observes a value is the only poll that ever will. A second `set` before
//! the robot polls replaces the first; the latest operator intent wins.

use tracing::{debug, info, warn};

use crate::domain::models::{ControlCommand, MissionTrigger};
use crate::services::mailbox::OneShot;

#[derive(Debug, Default)]
pub struct CommandDispatcher {
    start: OneShot<MissionTrigger>,
    control: OneShot<Option<ControlCommand>>,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch the start trigger. Repeated calls before a poll are no-ops.
    pub fn trigger_mission_start(&mut self) {
        self.start.set(MissionTrigger::Start);
        info!("mission start latched for robot");
    }

    /// Robot poll for the start trigger; observing `Start` consumes it.
    pub fn poll_mission_start(&mut self) -> MissionTrigger {
        let trigger = self.start.consume();
        if trigger == MissionTrigger::Start {
            info!("mission start delivered to robot");
        }
        trigger
    }

    /// Latch a control command, replacing any command the robot has not
    /// polled yet.
    pub fn set_control_command(&mut self, command: ControlCommand) {
        if let Some(Some(replaced)) = self.control.set(Some(command)) {
            warn!(
                replaced = %replaced,
                command = %command,
                "pending control command replaced before robot polled"
            );
        } else {
            info!(command = %command, "control command latched for robot");
        }
    }

    /// Robot poll for a control command; a returned command is consumed.
    pub fn poll_control_command(&mut self) -> Option<ControlCommand> {
        let command = self.control.consume();
        if let Some(command) = command {
            info!(command = %command, "control command delivered to robot");
        }
        command
    }

    /// Current start trigger without consuming it.
    pub fn mission_trigger(&self) -> MissionTrigger {
        self.start.peek()
    }

    /// Drop a pending start trigger, e.g. once the robot reports it is idle.
    pub fn force_idle(&mut self) {
        if self.start.is_pending() {
            debug!("pending mission start cleared");
        }
        self.start.reset();
    }
}
