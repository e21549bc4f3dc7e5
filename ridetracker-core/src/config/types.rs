//! Configuration type definitions

use ridetracker_protocol::MAX_DICT_SIZE;

use crate::input::Button;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the distance in metres is shown in kilometres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DistanceDisplay {
    /// Whole kilometres, truncated, with a fixed `.0` (1500 m → "1.0")
    #[default]
    WholeKm,
    /// Rounded to the nearest 100 m (1500 m → "1.5")
    Tenths,
}

impl DistanceDisplay {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "whole_km" => Some(DistanceDisplay::WholeKm),
            "tenths" => Some(DistanceDisplay::Tenths),
            _ => None,
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    pub distance_display: DistanceDisplay,
}

/// Button configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ButtonConfig {
    /// Button that starts and stops the ride
    pub start_stop: Button,
    /// Button that resets a stopped ride
    pub reset: Button,
    /// Debounce time in milliseconds
    pub debounce_ms: u16,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            start_stop: Button::Up,
            reset: Button::Down,
            debounce_ms: 20,
        }
    }
}

/// Paired-device link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinkConfig {
    /// Largest inbound dictionary accepted (bytes)
    pub inbox_size: u16,
    /// Largest outbound dictionary sent (bytes)
    pub outbox_size: u16,
    /// Time to wait for an ACK/NACK before the send is reported failed
    pub ack_timeout_ms: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            inbox_size: 64,
            outbox_size: 64,
            ack_timeout_ms: 3000,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RideConfig {
    pub session: SessionConfig,
    pub buttons: ButtonConfig,
    pub link: LinkConfig,
}

/// Reasons a configuration is rejected after parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigViolation {
    /// Start/stop and reset bound to the same button
    ButtonConflict,
    /// Inbox or outbox size is zero or above the protocol maximum
    MessageSizeOutOfRange,
    /// ACK timeout is zero
    ZeroAckTimeout,
}

impl RideConfig {
    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigViolation> {
        if self.buttons.start_stop == self.buttons.reset {
            return Err(ConfigViolation::ButtonConflict);
        }

        let size_ok = |size: u16| size > 0 && size as usize <= MAX_DICT_SIZE;
        if !size_ok(self.link.inbox_size) || !size_ok(self.link.outbox_size) {
            return Err(ConfigViolation::MessageSizeOutOfRange);
        }

        if self.link.ack_timeout_ms == 0 {
            return Err(ConfigViolation::ZeroAckTimeout);
        }

        Ok(())
    }
}
