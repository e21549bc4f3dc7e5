//! Ride screen trait

/// Text shown on the start/stop control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonLabel {
    /// Session stopped, pressing starts it
    #[default]
    Start,
    /// Session running, pressing stops it
    Stop,
}

impl ButtonLabel {
    /// Label matching a running flag
    pub const fn for_running(running: bool) -> Self {
        if running {
            ButtonLabel::Stop
        } else {
            ButtonLabel::Start
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ButtonLabel::Start => "start",
            ButtonLabel::Stop => "stop",
        }
    }
}

/// Screen owned by the ride app
///
/// Setters are fire-and-forget. An implementation keeps the latest value
/// of each element and redraws when convenient; the text is copied, so
/// callers may pass temporaries.
pub trait RideDisplay {
    /// Elapsed time, `H:MM`
    fn set_time_text(&mut self, text: &str);

    /// Distance in kilometres, one decimal
    fn set_distance_text(&mut self, text: &str);

    fn set_start_stop_label(&mut self, label: ButtonLabel);

    /// Show or hide the reset control
    fn set_reset_visible(&mut self, visible: bool);
}
