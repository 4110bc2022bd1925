//! Framebuffer graphics support
//!
//! Buffers pixels host-side until a frame (or one page of it) is ready for the
//! display driver. Both buffer types implement
//! [`DrawTarget`](embedded_graphics::draw_target::DrawTarget), so
//! `embedded_graphics` text and primitives draw onto them directly and a
//! [`GrayPainter`](crate::painter::GrayPainter) can shade them.
//!
//! One pixel is one bit, MSB first within a byte; a set bit is black (see
//! [`crate::color`] for the panel polarity).

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::color::Color;
use crate::{HEIGHT, WIDTH};

/// Background color every fresh buffer is filled with
pub const DEFAULT_BACKGROUND_COLOR: Color = Color::White;

/// Display rotation, only 90 degree increments supported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayRotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate by 90 degrees clockwise
    Rotate90,
    /// Rotate by 180 degrees clockwise
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

/// Packed bytes per buffer row
const fn line_bytes(width: u32) -> usize {
    (width as usize + 7) / 8
}

/// A rotation-aware, buffer-backed display surface.
///
/// Implementors only store the buffer and the rotation; the pixel packing
/// lives in the provided [`Display::draw_helper`].
pub trait Display: DrawTarget<Color = BinaryColor, Error = Infallible> {
    /// Packed frame data, ready for the display driver
    fn buffer(&self) -> &[u8];

    /// Mutable buffer access for the draw helper
    fn get_mut_buffer(&mut self) -> &mut [u8];

    /// Set the display rotation.
    ///
    /// This only concerns future drawing; anything already in the buffer
    /// stays as it is.
    fn set_rotation(&mut self, rotation: DisplayRotation);

    /// Get current rotation
    fn rotation(&self) -> DisplayRotation;

    /// Fill the whole buffer with one color
    fn clear_buffer(&mut self, background: Color) {
        let byte = background.get_byte_value();
        for cell in self.get_mut_buffer() {
            *cell = byte;
        }
    }

    /// Rotation-aware pixel set shared by all buffer types.
    ///
    /// `width` and `height` are the native (unrotated) buffer dimensions.
    /// Out-of-range pixels are discarded silently; bounds policy belongs to
    /// the sink, not to whoever rasterized the coordinates.
    fn draw_helper(&mut self, width: u32, height: u32, pixel: Pixel<BinaryColor>) {
        let rotation = self.rotation();
        let Pixel(point, color) = pixel;
        let (x, y) = match rotation {
            DisplayRotation::Rotate0 => (point.x, point.y),
            DisplayRotation::Rotate90 => (width as i32 - 1 - point.y, point.x),
            DisplayRotation::Rotate180 => {
                (width as i32 - 1 - point.x, height as i32 - 1 - point.y)
            }
            DisplayRotation::Rotate270 => (point.y, height as i32 - 1 - point.x),
        };
        if x < 0 || x >= width as i32 || y < 0 || y >= height as i32 {
            return;
        }

        let index = x as usize / 8 + y as usize * line_bytes(width);
        let mask: u8 = 0x80 >> (x as usize % 8);
        let buffer = self.get_mut_buffer();
        match color {
            BinaryColor::On => buffer[index] |= mask,
            BinaryColor::Off => buffer[index] &= !mask,
        }
    }
}

const BUFFER_SIZE: usize = line_bytes(WIDTH) * HEIGHT as usize;

/// Full-frame buffer for the 7.5" 800x480 panel
pub struct Display7in5 {
    buffer: [u8; BUFFER_SIZE],
    rotation: DisplayRotation,
}

impl Default for Display7in5 {
    fn default() -> Self {
        Display7in5 {
            buffer: [DEFAULT_BACKGROUND_COLOR.get_byte_value(); BUFFER_SIZE],
            rotation: DisplayRotation::default(),
        }
    }
}

impl Display7in5 {
    /// A white full-frame buffer, no rotation
    pub fn new() -> Self {
        Self::default()
    }
}

impl DrawTarget for Display7in5 {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for pixel in pixels {
            self.draw_helper(WIDTH, HEIGHT, pixel);
        }
        Ok(())
    }
}

impl OriginDimensions for Display7in5 {
    fn size(&self) -> Size {
        match self.rotation {
            DisplayRotation::Rotate0 | DisplayRotation::Rotate180 => Size::new(WIDTH, HEIGHT),
            DisplayRotation::Rotate90 | DisplayRotation::Rotate270 => Size::new(HEIGHT, WIDTH),
        }
    }
}

impl Display for Display7in5 {
    fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    fn get_mut_buffer(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    fn set_rotation(&mut self, rotation: DisplayRotation) {
        self.rotation = rotation;
    }

    fn rotation(&self) -> DisplayRotation {
        self.rotation
    }
}

/// Number of partial-refresh pages a full frame is split into
pub const PAGES: u32 = 2;

/// Rows covered by one page buffer
pub const PAGE_HEIGHT: u32 = HEIGHT / PAGES;

const PAGE_BUFFER_SIZE: usize = line_bytes(WIDTH) * PAGE_HEIGHT as usize;

/// Half-frame page buffer for partial-refresh rendering.
///
/// Takes absolute panel coordinates and discards whatever falls outside the
/// current page window, so the caller re-renders the same scene once per page:
///
/// ```
/// use epd_gray::{Gray, GrayPainter, Page7in5};
///
/// let mut page = Page7in5::new();
/// page.first_page();
/// loop {
///     GrayPainter::new(&mut page)
///         .fill_rect(10, 200, 64, 80, Gray::new(6))
///         .unwrap();
///     // driver writes page.buffer() at row page.page_top() here
///     if !page.next_page() {
///         break;
///     }
/// }
/// ```
///
/// Because the dither pattern is a pure function of absolute coordinates, a
/// shape split across pages tiles seamlessly. Rotation is not supported here;
/// pages address native RAM rows.
pub struct Page7in5 {
    buffer: [u8; PAGE_BUFFER_SIZE],
    page: u32,
}

impl Default for Page7in5 {
    fn default() -> Self {
        Page7in5 {
            buffer: [DEFAULT_BACKGROUND_COLOR.get_byte_value(); PAGE_BUFFER_SIZE],
            page: 0,
        }
    }
}

impl Page7in5 {
    /// A white buffer positioned on the first page
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the current page, 0-based
    pub fn page(&self) -> u32 {
        self.page
    }

    /// First row of the current page, in panel coordinates
    pub fn page_top(&self) -> i32 {
        (self.page * PAGE_HEIGHT) as i32
    }

    /// Packed page data, ready for the display driver
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Rewind to the first page and clear it
    pub fn first_page(&mut self) {
        self.page = 0;
        self.clear_page();
    }

    /// Advance to the next page, clearing the buffer for it.
    ///
    /// Returns `false` once the last page has been rendered, ending the
    /// render loop.
    pub fn next_page(&mut self) -> bool {
        if self.page + 1 >= PAGES {
            return false;
        }
        self.page += 1;
        self.clear_page();
        true
    }

    fn clear_page(&mut self) {
        self.buffer = [DEFAULT_BACKGROUND_COLOR.get_byte_value(); PAGE_BUFFER_SIZE];
    }

    fn set_pixel(&mut self, point: Point, color: BinaryColor) {
        let y = point.y - self.page_top();
        if point.x < 0 || point.x >= WIDTH as i32 || y < 0 || y >= PAGE_HEIGHT as i32 {
            return;
        }
        let index = point.x as usize / 8 + y as usize * line_bytes(WIDTH);
        let mask: u8 = 0x80 >> (point.x as usize % 8);
        match color {
            BinaryColor::On => self.buffer[index] |= mask,
            BinaryColor::Off => self.buffer[index] &= !mask,
        }
    }
}

impl DrawTarget for Page7in5 {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point, color);
        }
        Ok(())
    }
}

impl OriginDimensions for Page7in5 {
    fn size(&self) -> Size {
        // full panel: the page window is an internal matter
        Size::new(WIDTH, HEIGHT)
    }
}
