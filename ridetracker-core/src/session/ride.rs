//! Ride session state
//!
//! One tick is one minute. The tick counter is authoritative; hours and
//! minutes are its display decomposition and always satisfy
//! `hours * 60 + minutes == elapsed_ticks`.

use ridetracker_protocol::RunningNotification;

use super::format::{format_distance, format_elapsed, DistanceText, ElapsedText};
use crate::config::{DistanceDisplay, SessionConfig};
use crate::state::{Event, RunState};

/// Minutes per hour (ticks per hour rollover)
pub const MINUTES_PER_HOUR: u32 = 60;

/// Elapsed ride time split for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Elapsed {
    pub hours: u32,
    /// Always in 0..=59
    pub minutes: u8,
}

impl Elapsed {
    /// `H:MM` text
    pub fn text(&self) -> ElapsedText {
        format_elapsed(self.hours, self.minutes)
    }
}

/// A single ride
///
/// Created stopped and zeroed; lives for the lifetime of the app. Mutated
/// only through `start_stop`, `tick`, `reset` and `on_distance_update`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RideSession {
    /// Running or stopped
    state: RunState,
    /// Minute ticks accumulated while running
    elapsed_ticks: u32,
    /// Display decomposition of `elapsed_ticks`
    elapsed: Elapsed,
    /// Last distance reported by the paired device
    distance_metres: u32,
    /// Kilometre text policy
    distance_display: DistanceDisplay,
}

impl Default for RideSession {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

impl RideSession {
    /// Create a stopped, zeroed session
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            state: RunState::Stopped,
            elapsed_ticks: 0,
            elapsed: Elapsed::default(),
            distance_metres: 0,
            distance_display: config.distance_display,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    pub fn elapsed(&self) -> Elapsed {
        self.elapsed
    }

    pub fn hours(&self) -> u32 {
        self.elapsed.hours
    }

    pub fn minutes(&self) -> u8 {
        self.elapsed.minutes
    }

    pub fn distance_metres(&self) -> u32 {
        self.distance_metres
    }

    /// Current elapsed-time text
    pub fn elapsed_text(&self) -> ElapsedText {
        self.elapsed.text()
    }

    /// Current distance text
    pub fn distance_text(&self) -> DistanceText {
        format_distance(self.distance_metres, self.distance_display)
    }

    /// Toggle between running and stopped
    ///
    /// Returns the notification for the paired device carrying the new
    /// running value.
    pub fn start_stop(&mut self) -> RunningNotification {
        self.state = self.state.transition(Event::StartStop);
        RunningNotification::new(self.state.is_running())
    }

    /// Advance by one minute
    ///
    /// Ignored while stopped. Returns the new elapsed time when it changed.
    pub fn tick(&mut self) -> Option<Elapsed> {
        if !self.state.accumulates_time() {
            return None;
        }

        // Saturated after ~8000 years; stop counting rather than wrap
        self.elapsed_ticks = self.elapsed_ticks.checked_add(1)?;

        if self.elapsed_ticks % MINUTES_PER_HOUR == 0 {
            self.elapsed.minutes = 0;
            self.elapsed.hours += 1;
        } else {
            self.elapsed.minutes += 1;
        }

        Some(self.elapsed)
    }

    /// Zero time and distance
    ///
    /// Only allowed while stopped; returns whether the reset happened.
    pub fn reset(&mut self) -> bool {
        if !self.state.reset_allowed() {
            return false;
        }

        self.elapsed_ticks = 0;
        self.elapsed = Elapsed::default();
        self.distance_metres = 0;
        true
    }

    /// Store the distance reported by the paired device
    ///
    /// Returns the kilometre text to display.
    pub fn on_distance_update(&mut self, metres: u32) -> DistanceText {
        self.distance_metres = metres;
        self.distance_text()
    }
}
