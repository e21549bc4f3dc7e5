//! Physical buttons and their mapping to session events

use crate::config::ButtonConfig;
use crate::state::Event;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Watch buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Button {
    Back,
    Up,
    Select,
    Down,
}

impl Button {
    /// Parse a button name as used in configuration files
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "back" => Some(Button::Back),
            "up" => Some(Button::Up),
            "select" => Some(Button::Select),
            "down" => Some(Button::Down),
            _ => None,
        }
    }
}

/// Single-click bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMap {
    start_stop: Button,
    reset: Button,
}

impl Default for ButtonMap {
    fn default() -> Self {
        Self::from_config(&ButtonConfig::default())
    }
}

impl ButtonMap {
    pub fn from_config(config: &ButtonConfig) -> Self {
        Self {
            start_stop: config.start_stop,
            reset: config.reset,
        }
    }

    /// Event bound to a click, if any
    pub fn event_for(&self, button: Button) -> Option<Event> {
        if button == self.start_stop {
            Some(Event::StartStop)
        } else if button == self.reset {
            Some(Event::Reset)
        } else {
            None
        }
    }
}
