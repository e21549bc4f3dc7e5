//! Watch face layout
//!
//! Six elements on a 144x168 screen with a black background. Labels and
//! buttons are light text on black; value texts are dark text on a white
//! box, right-aligned.

/// Screen width in pixels
pub const SCREEN_WIDTH: u32 = 144;

/// Screen height in pixels
pub const SCREEN_HEIGHT: u32 = 168;

pub const TIME_LABEL: &str = "Time";
pub const DISTANCE_LABEL: &str = "Distance (km)";
pub const RESET_LABEL: &str = "reset";

/// Rectangle in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the frame lies entirely on screen
    pub const fn is_on_screen(&self) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x as u32 + self.width <= SCREEN_WIDTH
            && self.y as u32 + self.height <= SCREEN_HEIGHT
    }
}

/// Typeface size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// Labels and buttons
    Small,
    /// Time and distance values
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Align {
    Left,
    Right,
}

/// How an element is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ElementStyle {
    pub frame: Frame,
    pub font: Font,
    pub align: Align,
    /// White text on black when set, black on white otherwise
    pub light_text: bool,
}

/// Elements of the watch face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Element {
    TimeLabel,
    TimeText,
    DistanceLabel,
    DistanceText,
    StartStop,
    Reset,
}

impl Element {
    /// All elements, in drawing order
    pub const ALL: [Element; 6] = [
        Element::TimeLabel,
        Element::TimeText,
        Element::DistanceLabel,
        Element::DistanceText,
        Element::StartStop,
        Element::Reset,
    ];

    /// Bit used for dirty tracking
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }

    pub const fn style(self) -> ElementStyle {
        match self {
            Element::TimeLabel => label(Frame::new(5, 10, 60, 25), Align::Left),
            Element::TimeText => value(Frame::new(5, 35, 60, 30)),
            Element::DistanceLabel => label(Frame::new(5, 85, 85, 25), Align::Left),
            Element::DistanceText => value(Frame::new(5, 110, 60, 30)),
            Element::StartStop => label(Frame::new(109, 10, 30, 25), Align::Right),
            Element::Reset => label(Frame::new(109, 110, 30, 25), Align::Right),
        }
    }
}

const fn label(frame: Frame, align: Align) -> ElementStyle {
    ElementStyle {
        frame,
        font: Font::Small,
        align,
        light_text: true,
    }
}

const fn value(frame: Frame) -> ElementStyle {
    ElementStyle {
        frame,
        font: Font::Large,
        align: Align::Right,
        light_text: false,
    }
}
