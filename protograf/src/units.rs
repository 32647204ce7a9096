//! Units of length and standard paper sizes.
//!
//! Everything in protograf is measured in points (1/72 inch); these helpers
//! convert user measurements into points.

use std::str::FromStr;

use kurbo::Size;

use crate::Error;

/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Centimetres per inch.
pub const CM_PER_INCH: f64 = 2.54;

/// A unit of length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    #[default]
    Point,
    Inch,
    Cm,
    Mm,
}

impl Unit {
    /// The number of points in one of this unit.
    pub fn points(self) -> f64 {
        match self {
            Unit::Point => 1.0,
            Unit::Inch => POINTS_PER_INCH,
            Unit::Cm => POINTS_PER_INCH / CM_PER_INCH,
            Unit::Mm => POINTS_PER_INCH / (CM_PER_INCH * 10.0),
        }
    }

    /// Convert a value in this unit to points.
    pub fn to_points(self, value: f64) -> f64 {
        value * self.points()
    }

    /// Convert a value in points to this unit.
    pub fn from_points(self, value: f64) -> f64 {
        value / self.points()
    }

    /// Convert a width and height in this unit to a size in points.
    pub fn size(self, width: f64, height: f64) -> Size {
        Size::new(self.to_points(width), self.to_points(height))
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt" | "point" | "points" => Ok(Unit::Point),
            "in" | "inch" | "inches" => Ok(Unit::Inch),
            "cm" => Ok(Unit::Cm),
            "mm" => Ok(Unit::Mm),
            other => Err(Error::InvalidArgs(format!("unknown unit '{}'", other))),
        }
    }
}

/// Standard paper sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

impl PaperSize {
    /// The portrait size of the paper, in points.
    pub fn size(self) -> Size {
        match self {
            PaperSize::A3 => Unit::Mm.size(297.0, 420.0),
            PaperSize::A4 => Unit::Mm.size(210.0, 297.0),
            PaperSize::A5 => Unit::Mm.size(148.0, 210.0),
            PaperSize::Letter => Unit::Inch.size(8.5, 11.0),
            PaperSize::Legal => Unit::Inch.size(8.5, 14.0),
            PaperSize::Tabloid => Unit::Inch.size(11.0, 17.0),
        }
    }

    /// The landscape size of the paper, in points.
    pub fn landscape(self) -> Size {
        let size = self.size();
        Size::new(size.height, size.width)
    }
}
