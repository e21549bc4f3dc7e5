//! Watch face model
//!
//! Keeps the latest content of every element and which elements changed
//! since the last render.

use heapless::String;

use ridetracker_core::session::{DistanceText, ElapsedText};
use ridetracker_core::traits::{ButtonLabel, RideDisplay};

use crate::backend::{DisplayBackend, DisplayError};
use crate::layout::{Element, DISTANCE_LABEL, RESET_LABEL, TIME_LABEL};

/// Every element bit set
const ALL_DIRTY: u8 = 0b0011_1111;

/// Watch face content with per-element dirty tracking
#[derive(Clone)]
pub struct RideScreen {
    time: ElapsedText,
    distance: DistanceText,
    label: ButtonLabel,
    reset_visible: bool,
    /// Elements changed since the last render
    dirty: u8,
    /// Clear the panel before the next render
    full_redraw: bool,
}

impl Default for RideScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl RideScreen {
    /// Stopped, zeroed face
    pub fn new() -> Self {
        let mut time = String::new();
        let _ = time.push_str("0:00");
        let mut distance = String::new();
        let _ = distance.push_str("0.0");

        Self {
            time,
            distance,
            label: ButtonLabel::Start,
            reset_visible: true,
            dirty: ALL_DIRTY,
            full_redraw: true,
        }
    }

    /// Current text of an element, `None` when hidden
    pub fn text(&self, element: Element) -> Option<&str> {
        match element {
            Element::TimeLabel => Some(TIME_LABEL),
            Element::TimeText => Some(self.time.as_str()),
            Element::DistanceLabel => Some(DISTANCE_LABEL),
            Element::DistanceText => Some(self.distance.as_str()),
            Element::StartStop => Some(self.label.as_str()),
            Element::Reset => self.reset_visible.then_some(RESET_LABEL),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty != 0 || self.full_redraw
    }

    pub fn is_element_dirty(&self, element: Element) -> bool {
        self.dirty & element.bit() != 0
    }

    /// Force a full redraw on the next render
    pub fn invalidate(&mut self) {
        self.dirty = ALL_DIRTY;
        self.full_redraw = true;
    }

    /// Copy of the face carrying the pending changes; marks this one clean
    ///
    /// Lets a renderer work on the copy while the original keeps taking
    /// updates.
    pub fn snapshot(&mut self) -> RideScreen {
        let copy = self.clone();
        self.dirty = 0;
        self.full_redraw = false;
        copy
    }

    /// Draw changed elements and flush
    ///
    /// Returns whether anything was drawn. On error the screen stays dirty
    /// and the next render retries.
    pub fn render<B: DisplayBackend>(&mut self, backend: &mut B) -> Result<bool, DisplayError> {
        if !self.is_dirty() {
            return Ok(false);
        }

        if self.full_redraw {
            backend.clear()?;
            self.dirty = ALL_DIRTY;
        }

        for element in Element::ALL {
            if !self.is_element_dirty(element) {
                continue;
            }
            let style = element.style();
            match self.text(element) {
                Some(text) => backend.draw_element(&style, text)?,
                None => backend.blank(style.frame)?,
            }
        }

        backend.flush()?;
        self.dirty = 0;
        self.full_redraw = false;
        Ok(true)
    }

    fn mark(&mut self, element: Element) {
        self.dirty |= element.bit();
    }
}

/// Copy `text` into `slot`; returns whether it changed
fn replace<const N: usize>(slot: &mut String<N>, text: &str) -> bool {
    if slot.as_str() == text {
        return false;
    }
    slot.clear();
    // Longer text is clipped on screen anyway
    for ch in text.chars() {
        if slot.push(ch).is_err() {
            break;
        }
    }
    true
}

impl RideDisplay for RideScreen {
    fn set_time_text(&mut self, text: &str) {
        if replace(&mut self.time, text) {
            self.mark(Element::TimeText);
        }
    }

    fn set_distance_text(&mut self, text: &str) {
        if replace(&mut self.distance, text) {
            self.mark(Element::DistanceText);
        }
    }

    fn set_start_stop_label(&mut self, label: ButtonLabel) {
        if self.label != label {
            self.label = label;
            self.mark(Element::StartStop);
        }
    }

    fn set_reset_visible(&mut self, visible: bool) {
        if self.reset_visible != visible {
            self.reset_visible = visible;
            self.mark(Element::Reset);
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RideScreen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "RideScreen[{}, {}, {}, reset={}]",
            self.time.as_str(),
            self.distance.as_str(),
            self.label.as_str(),
            self.reset_visible
        );
    }
}
