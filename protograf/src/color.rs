//! A simple representation of color

use std::str::FromStr;

use crate::Error;

/// A datatype representing color.
///
/// This is a 32 bit RGBA value; it exists mainly to give component styles
/// a proper type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(u32);

impl Color {
    /// Create a color from a 32-bit rgba value (alpha as least significant byte).
    pub const fn rgba32(rgba: u32) -> Color {
        Color(rgba)
    }

    /// Create a color from a 24-bit rgb value (red most significant, blue least).
    pub const fn rgb24(rgb: u32) -> Color {
        Color::rgba32((rgb << 8) | 0xff)
    }

    /// Create an opaque color from 8 bit per sample RGB values.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Color {
        Color::rgba8(r, g, b, 0xff)
    }

    /// Create a color from 8 bit per sample RGBA values.
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color::rgba32(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Create a color from three floating point values, each in the range 0.0 to 1.0.
    pub fn rgb(r: impl Into<f64>, g: impl Into<f64>, b: impl Into<f64>) -> Color {
        Color::rgb8(unit_to_u8(r.into()), unit_to_u8(g.into()), unit_to_u8(b.into()))
    }

    /// Parse a color from a `#rgb`, `#rrggbb` or `#rrggbbaa` string.
    ///
    /// The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Color, Error> {
        let digits = hex.trim().trim_start_matches('#');
        let err = || Error::InvalidColor(hex.to_string());
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| err())?;
        match digits.len() {
            3 => {
                let (r, g, b) = ((value >> 8) & 0xf, (value >> 4) & 0xf, value & 0xf);
                Ok(Color::rgb24(((r * 0x11) << 16) | ((g * 0x11) << 8) | (b * 0x11)))
            }
            6 => Ok(Color::rgb24(value)),
            8 => Ok(Color::rgba32(value)),
            _ => Err(err()),
        }
    }

    /// Change just the alpha value of a color.
    ///
    /// The `a` value represents alpha in the range 0.0 to 1.0.
    pub fn with_alpha(self, a: impl Into<f64>) -> Color {
        let a = unit_to_u8(a.into()) as u32;
        Color::rgba32((self.as_rgba32() & !0xff) | a)
    }

    /// Convert a color value to a 32-bit rgba value.
    pub const fn as_rgba32(self) -> u32 {
        self.0
    }

    /// Convert a color to its four 8 bit components.
    pub const fn as_rgba8(self) -> (u8, u8, u8, u8) {
        let rgba = self.0;
        (
            (rgba >> 24) as u8,
            ((rgba >> 16) & 0xff) as u8,
            ((rgba >> 8) & 0xff) as u8,
            (rgba & 0xff) as u8,
        )
    }

    /// The alpha component, in the range 0.0 to 1.0.
    pub fn alpha(self) -> f64 {
        (self.0 & 0xff) as f64 / 255.0
    }

    /// Opaque white.
    pub const WHITE: Color = Color::rgba32(0xff_ff_ff_ff);

    /// Opaque black.
    pub const BLACK: Color = Color::rgba32(0x00_00_00_ff);

    /// Fully transparent.
    pub const TRANSPARENT: Color = Color::rgba32(0);

    pub const GREY: Color = Color::rgb8(0x80, 0x80, 0x80);
    pub const LIGHT_GREY: Color = Color::rgb8(0xd3, 0xd3, 0xd3);
    pub const RED: Color = Color::rgb8(0xff, 0x00, 0x00);
    pub const GREEN: Color = Color::rgb8(0x00, 0x80, 0x00);
    pub const BLUE: Color = Color::rgb8(0x00, 0x00, 0xff);
    pub const YELLOW: Color = Color::rgb8(0xff, 0xff, 0x00);
    pub const TAN: Color = Color::rgb8(0xd2, 0xb4, 0x8c);
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

fn unit_to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}
