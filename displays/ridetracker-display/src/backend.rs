//! Display backend trait
//!
//! Defines the interface for panels the watch face can be drawn on.

use crate::layout::{ElementStyle, Frame};

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel
    Communication,
    /// Frame outside the screen
    InvalidCoordinates,
    /// Panel not initialized
    NotInitialized,
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for drawing the watch face.
/// Drawing may be buffered; nothing is guaranteed visible until `flush`.
pub trait DisplayBackend {
    /// Fill the whole screen with the background colour
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw one element
    ///
    /// Fills the element's frame with its background and draws `text`
    /// with the element's font and alignment, clipped to the frame.
    fn draw_element(&mut self, style: &ElementStyle, text: &str) -> Result<(), DisplayError>;

    /// Fill a frame with the screen background (hidden element)
    fn blank(&mut self, frame: Frame) -> Result<(), DisplayError>;

    /// Push buffered content to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;
}
