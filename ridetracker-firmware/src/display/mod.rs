//! Watch face output
//!
//! The controller writes to a `SharedScreen`; the display task takes
//! snapshots of it and renders them to the Sharp memory LCD.

pub mod sharp;
pub mod shared;

pub use sharp::SharpMemoryDisplay;
pub use shared::{ScreenCell, SharedScreen};

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};

/// The board's panel
pub type Lcd = SharpMemoryDisplay<Spi<'static, SPI0, Blocking>, Output<'static>>;
