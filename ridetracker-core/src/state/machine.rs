//! Run state definition

use super::events::Event;

/// Session run states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// Initial state; time does not accumulate, reset is allowed
    #[default]
    Stopped,
    /// Time accumulates on every minute tick
    Running,
}

impl RunState {
    /// Check if minute ticks advance the elapsed time
    pub fn accumulates_time(&self) -> bool {
        matches!(self, RunState::Running)
    }

    /// Check if the session may be reset
    pub fn reset_allowed(&self) -> bool {
        matches!(self, RunState::Stopped)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    /// Process an event and return the next state
    ///
    /// Only `StartStop` changes the run state; it toggles.
    pub fn transition(self, event: Event) -> Self {
        match (self, event) {
            (RunState::Stopped, Event::StartStop) => RunState::Running,
            (RunState::Running, Event::StartStop) => RunState::Stopped,
            _ => self,
        }
    }
}
