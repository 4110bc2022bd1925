//! Simulated grayscale for strict black/white ePaper panels
//!
//! The panel RAM knows exactly two ink states, yet the dashboard wants shaded
//! boxes. This crate fakes the in-between levels with a fixed 4x4 ordered
//! (Bayer) dither pattern: every shape is rasterized pixel by pixel, and each
//! pixel is turned black or white depending on its coordinate and the requested
//! [`Gray`] level.
//!
//! This is losely modeled after the
//! [epd-waveshare](https://github.com/caemor/epd-waveshare) graphics support
//! but built for the needs of one 800x480 panel.
//!
//! ### Usage
//!
//! 1. create a full-frame [`Display7in5`] buffer (or a [`Page7in5`] when RAM is
//!    tight) and paint onto it with a [`GrayPainter`], mixing in
//!    [`embedded_graphics`](https://github.com/embedded-graphics/embedded-graphics)
//!    text and primitives as needed
//! 1. then hand the packed buffer to the display driver for transfer
//!
//! ```
//! use epd_gray::{Display, Display7in5, Gray, GrayPainter};
//!
//! let mut display = Display7in5::default();
//! let mut painter = GrayPainter::new(&mut display);
//! painter.fill_round_rect(20, 20, 15, 176, 3, Gray::new(4)).unwrap();
//! painter.draw_line(0, 210, 120, 250, Gray::BLACK).unwrap();
//!
//! // hand the packed frame to the display driver
//! let _frame: &[u8] = display.buffer();
//! ```
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod color;
pub mod dither;
pub mod graphics;
pub mod painter;

pub use crate::color::Color;
pub use crate::dither::Gray;
pub use crate::graphics::{Display, Display7in5, DisplayRotation, Page7in5};
pub use crate::painter::GrayPainter;

/// Display height, pixels vertically
pub const HEIGHT: u32 = 480;

/// Display width, pixels horizontally
pub const WIDTH: u32 = 800;
