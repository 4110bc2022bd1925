//! Ink colors for the black/white RAM buffer
//!
//! The panel has inverted polarity compared to the SSD datasheet default:
//! a set bit (`0xFF` byte) drives black, a cleared bit (`0x00`) stays white.
//! Buffers therefore start out all-zero for a white background.

use embedded_graphics::pixelcolor::BinaryColor;

/// The two ink states the panel can actually show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Black ink (bit set in RAM)
    Black,
    /// White / no ink (bit cleared in RAM)
    White,
}

impl Color {
    /// Value of a single pixel bit in the packed buffer
    pub const fn get_bit_value(self) -> u8 {
        match self {
            Color::Black => 1,
            Color::White => 0,
        }
    }

    /// Value of a full buffer byte of this color, 8 pixels at once
    pub const fn get_byte_value(self) -> u8 {
        match self {
            Color::Black => 0xFF,
            Color::White => 0x00,
        }
    }

    /// The opposite ink state
    pub const fn inverse(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl From<BinaryColor> for Color {
    fn from(color: BinaryColor) -> Self {
        match color {
            BinaryColor::On => Color::Black,
            BinaryColor::Off => Color::White,
        }
    }
}

impl From<Color> for BinaryColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => BinaryColor::On,
            Color::White => BinaryColor::Off,
        }
    }
}
