//! In-memory 1-bit framebuffer
//!
//! Backs panels that are written line by line (Sharp memory LCD and
//! similar). Pixels are packed MSB-first, 18 bytes per line; a set bit is
//! white. Lines are marked dirty when any pixel in them changes.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::backend::{DisplayBackend, DisplayError};
use crate::layout::{Align, ElementStyle, Font, Frame, SCREEN_HEIGHT, SCREEN_WIDTH};

const WIDTH: usize = SCREEN_WIDTH as usize;
const HEIGHT: usize = SCREEN_HEIGHT as usize;

/// Bytes per line
pub const LINE_BYTES: usize = WIDTH / 8;

const BUFFER_LEN: usize = LINE_BYTES * HEIGHT;

fn mono_font(font: Font) -> &'static MonoFont<'static> {
    match font {
        Font::Small => &FONT_6X10,
        Font::Large => &FONT_10X20,
    }
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

fn rectangle(frame: Frame) -> Rectangle {
    Rectangle::new(
        Point::new(frame.x, frame.y),
        Size::new(frame.width, frame.height),
    )
}

/// 144x168 monochrome framebuffer
pub struct Framebuffer {
    buffer: [u8; BUFFER_LEN],
    dirty: [bool; HEIGHT],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// All black, every line dirty
    pub const fn new() -> Self {
        Self {
            buffer: [0; BUFFER_LEN],
            dirty: [true; HEIGHT],
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.iter().any(|&d| d)
    }

    /// Lines changed since the last `mark_clean`, with their index
    pub fn dirty_lines(&self) -> impl Iterator<Item = (usize, &[u8])> + '_ {
        let dirty = &self.dirty;
        self.buffer
            .chunks_exact(LINE_BYTES)
            .enumerate()
            .filter(move |(y, _)| dirty[*y])
    }

    pub fn mark_clean(&mut self) {
        self.dirty = [false; HEIGHT];
    }

    /// Mark every line dirty
    pub fn mark_all_dirty(&mut self) {
        self.dirty = [true; HEIGHT];
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: BinaryColor) {
        let index = y * LINE_BYTES + x / 8;
        let mask = 0x80 >> (x % 8);
        let old = self.buffer[index];
        let new = if color.is_on() { old | mask } else { old & !mask };
        if new != old {
            self.buffer[index] = new;
            self.dirty[y] = true;
        }
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as usize, point.y as usize);
            if x < WIDTH && y < HEIGHT {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }
}

impl DisplayBackend for Framebuffer {
    fn clear(&mut self) -> Result<(), DisplayError> {
        let area = self.bounding_box();
        infallible(self.fill_solid(&area, BinaryColor::Off));
        Ok(())
    }

    fn draw_element(&mut self, style: &ElementStyle, text: &str) -> Result<(), DisplayError> {
        let frame = style.frame;
        if !frame.is_on_screen() {
            return Err(DisplayError::InvalidCoordinates);
        }

        let area = rectangle(frame);
        let (background, ink) = if style.light_text {
            (BinaryColor::Off, BinaryColor::On)
        } else {
            (BinaryColor::On, BinaryColor::Off)
        };
        infallible(self.fill_solid(&area, background));

        let (alignment, x) = match style.align {
            Align::Left => (Alignment::Left, frame.x),
            Align::Right => (Alignment::Right, frame.x + frame.width as i32 - 1),
        };
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(Baseline::Middle)
            .build();
        let character_style = MonoTextStyle::new(mono_font(style.font), ink);
        let position = Point::new(x, frame.y + frame.height as i32 / 2);

        infallible(
            Text::with_text_style(text, position, character_style, text_style)
                .draw(&mut self.clipped(&area)),
        );
        Ok(())
    }

    fn blank(&mut self, frame: Frame) -> Result<(), DisplayError> {
        if !frame.is_on_screen() {
            return Err(DisplayError::InvalidCoordinates);
        }
        infallible(self.fill_solid(&rectangle(frame), BinaryColor::Off));
        Ok(())
    }

    /// Nothing to push; panel drivers read `dirty_lines`
    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

}
