//! Sharp memory LCD driver
//!
//! Driver for 144x168 Sharp memory LCDs (LS013B7DH05 and similar) over
//! SPI. Only changed lines are written. Chip select is active high.
//!
//! The panel reads line addresses LSB-first while the RP2040 SPI sends
//! MSB-first, so addresses are bit-reversed here. Pixel data is stored
//! MSB-first in the framebuffer and goes out unchanged.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use ridetracker_display::{DisplayBackend, DisplayError, ElementStyle, Frame, Framebuffer};

/// Panel commands, MSB-first
mod cmd {
    pub const WRITE_LINE: u8 = 0x80;
    pub const VCOM: u8 = 0x40;
    pub const CLEAR_ALL: u8 = 0x20;
    pub const NOP: u8 = 0x00;
}

/// Line addresses start at 1
fn line_address(y: usize) -> u8 {
    ((y + 1) as u8).reverse_bits()
}

/// Sharp memory LCD driver
pub struct SharpMemoryDisplay<SPI, CS> {
    spi: SPI,
    cs: CS,
    framebuffer: Framebuffer,
    /// Current VCOM polarity
    vcom: bool,
}

impl<SPI, CS> SharpMemoryDisplay<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self {
            spi,
            cs,
            framebuffer: Framebuffer::new(),
            vcom: false,
        }
    }

    /// Clear the panel memory
    ///
    /// The framebuffer is marked dirty so the next flush writes every line.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        let command = cmd::CLEAR_ALL | self.vcom_bit();
        self.transfer(&[command, cmd::NOP])?;
        self.framebuffer.mark_all_dirty();
        Ok(())
    }

    /// Flip VCOM polarity
    ///
    /// Must happen about once a second to avoid DC bias on the panel.
    pub fn toggle_vcom(&mut self) -> Result<(), DisplayError> {
        self.vcom = !self.vcom;
        let command = self.vcom_bit();
        self.transfer(&[command, cmd::NOP])
    }

    fn vcom_bit(&self) -> u8 {
        if self.vcom {
            cmd::VCOM
        } else {
            0
        }
    }

    fn transfer(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.cs.set_high().map_err(|_| DisplayError::Communication)?;
        let result = self.spi.write(bytes).and_then(|_| self.spi.flush());
        self.cs.set_low().map_err(|_| DisplayError::Communication)?;
        result.map_err(|_| DisplayError::Communication)
    }

    fn write_dirty_lines(&mut self) -> Result<(), DisplayError> {
        if !self.framebuffer.is_dirty() {
            return Ok(());
        }

        let command = cmd::WRITE_LINE | self.vcom_bit();
        self.cs.set_high().map_err(|_| DisplayError::Communication)?;
        let result = write_lines(&mut self.spi, command, &self.framebuffer);
        self.cs.set_low().map_err(|_| DisplayError::Communication)?;
        result.map_err(|_| DisplayError::Communication)?;

        self.framebuffer.mark_clean();
        Ok(())
    }
}

/// Multi-line write: command, then address + data + trailer per line,
/// then a final trailer
fn write_lines<SPI: SpiBus>(spi: &mut SPI, command: u8, fb: &Framebuffer) -> Result<(), SPI::Error> {
    spi.write(&[command])?;
    for (y, line) in fb.dirty_lines() {
        spi.write(&[line_address(y)])?;
        spi.write(line)?;
        spi.write(&[cmd::NOP])?;
    }
    spi.write(&[cmd::NOP])?;
    spi.flush()
}

impl<SPI, CS> DisplayBackend for SharpMemoryDisplay<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.framebuffer.clear()
    }

    fn draw_element(&mut self, style: &ElementStyle, text: &str) -> Result<(), DisplayError> {
        self.framebuffer.draw_element(style, text)
    }

    fn blank(&mut self, frame: Frame) -> Result<(), DisplayError> {
        self.framebuffer.blank(frame)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.write_dirty_lines()
    }
}
