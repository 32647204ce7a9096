//! Hexagon geometry and hex coordinate systems.
//!
//! Three coordinate schemes are supported:
//!
//! - [`Offset`]: the column/row numbering printed on most wargame maps. Every
//!   other column (flat hexes) or row (pointy hexes) is shifted by half a cell;
//!   [`OffsetParity`] says which.
//! - [`Axial`]: two skewed axes in which neighbours are a constant step away.
//! - [`Cube`]: axial with the redundant third axis, used for rounding.
//!
//! The conversions follow the "odd-q"/"even-q" (flat) and "odd-r"/"even-r"
//! (pointy) conventions described at
//! <https://www.redblobgames.com/grids/hexagons/>.

use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use kurbo::{BezPath, Point, Vec2};

use crate::error::ensure_positive;
use crate::geom::{point_on_circle, polygon_path, SQRT_3};
use crate::util::column_letters;
use crate::Error;

/// Which way up a hexagon sits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HexOrientation {
    /// Flat edges at top and bottom; columns interlock vertically.
    #[default]
    Flat,
    /// Vertices at top and bottom; rows interlock horizontally.
    Pointy,
}

impl FromStr for HexOrientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" | "f" => Ok(HexOrientation::Flat),
            "pointy" | "p" => Ok(HexOrientation::Pointy),
            other => Err(Error::InvalidArgs(format!("unknown orientation '{}'", other))),
        }
    }
}

/// Which columns (flat) or rows (pointy), counting from zero, are shifted by
/// half a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OffsetParity {
    Even,
    #[default]
    Odd,
}

impl OffsetParity {
    /// Whether line `n` (a column or row index) is shifted.
    pub fn is_shifted(self, n: i32) -> bool {
        let odd = n & 1 == 1;
        match self {
            OffsetParity::Odd => odd,
            OffsetParity::Even => !odd,
        }
    }
}

/// The size of a regular hexagon, together with its orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexGeometry {
    side: f64,
    orientation: HexOrientation,
}

impl HexGeometry {
    /// A hexagon with the given side length (which is also its circumradius).
    pub fn from_side(orientation: HexOrientation, side: f64) -> Result<HexGeometry, Error> {
        let side = ensure_positive("hexagon side", side)?;
        Ok(HexGeometry { side, orientation })
    }

    /// A hexagon whose opposite flat edges are `height` apart.
    pub fn from_height(orientation: HexOrientation, height: f64) -> Result<HexGeometry, Error> {
        let height = ensure_positive("hexagon height", height)?;
        Ok(HexGeometry {
            side: height / SQRT_3,
            orientation,
        })
    }

    /// A hexagon with the given centre-to-vertex distance.
    pub fn from_radius(orientation: HexOrientation, radius: f64) -> Result<HexGeometry, Error> {
        HexGeometry::from_side(orientation, radius)
    }

    /// A hexagon whose opposite vertices are `diameter` apart.
    pub fn from_diameter(orientation: HexOrientation, diameter: f64) -> Result<HexGeometry, Error> {
        let diameter = ensure_positive("hexagon diameter", diameter)?;
        Ok(HexGeometry {
            side: diameter / 2.0,
            orientation,
        })
    }

    pub fn orientation(&self) -> HexOrientation {
        self.orientation
    }

    pub fn side(&self) -> f64 {
        self.side
    }

    /// Distance from the centre to the middle of an edge.
    pub fn apothem(&self) -> f64 {
        self.side * SQRT_3 / 2.0
    }

    /// Distance between opposite flat edges.
    pub fn flat_to_flat(&self) -> f64 {
        self.side * SQRT_3
    }

    /// Width of the bounding box.
    pub fn width(&self) -> f64 {
        match self.orientation {
            HexOrientation::Flat => 2.0 * self.side,
            HexOrientation::Pointy => self.flat_to_flat(),
        }
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f64 {
        match self.orientation {
            HexOrientation::Flat => self.flat_to_flat(),
            HexOrientation::Pointy => 2.0 * self.side,
        }
    }

    /// Horizontal distance between the centres of adjacent columns.
    pub fn column_step(&self) -> f64 {
        match self.orientation {
            HexOrientation::Flat => 1.5 * self.side,
            HexOrientation::Pointy => self.width(),
        }
    }

    /// Vertical distance between the centres of adjacent rows.
    pub fn row_step(&self) -> f64 {
        match self.orientation {
            HexOrientation::Flat => self.height(),
            HexOrientation::Pointy => 1.5 * self.side,
        }
    }

    /// The displacement of a shifted column (flat) or row (pointy).
    pub fn shift(&self) -> Vec2 {
        match self.orientation {
            HexOrientation::Flat => Vec2::new(0.0, self.height() / 2.0),
            HexOrientation::Pointy => Vec2::new(self.width() / 2.0, 0.0),
        }
    }

    /// Angle of the first vertex; the rest follow counter-clockwise at 60° steps.
    pub fn first_vertex_angle(&self) -> f64 {
        match self.orientation {
            HexOrientation::Flat => 0.0,
            HexOrientation::Pointy => 30.0,
        }
    }

    /// The six vertices of a hexagon centred on `center`.
    pub fn vertices(&self, center: Point) -> [Point; 6] {
        let start = self.first_vertex_angle();
        std::array::from_fn(|i| point_on_circle(center, self.side, start + 60.0 * i as f64))
    }

    /// The outline of a hexagon centred on `center`.
    pub fn path(&self, center: Point) -> BezPath {
        polygon_path(&self.vertices(center))
    }

    /// Position of a cell centre relative to the centre of axial `(0, 0)`.
    pub fn axial_to_pixel(&self, hex: Axial) -> Vec2 {
        let (q, r) = (hex.q as f64, hex.r as f64);
        let s = self.side;
        match self.orientation {
            HexOrientation::Flat => Vec2::new(s * 1.5 * q, s * (SQRT_3 / 2.0 * q + SQRT_3 * r)),
            HexOrientation::Pointy => Vec2::new(s * (SQRT_3 * q + SQRT_3 / 2.0 * r), s * 1.5 * r),
        }
    }

    /// The hex containing a point given relative to the centre of axial `(0, 0)`.
    pub fn pixel_to_axial(&self, v: Vec2) -> Axial {
        let s = self.side;
        let (fq, fr) = match self.orientation {
            HexOrientation::Flat => (2.0 / 3.0 * v.x / s, (-v.x / 3.0 + SQRT_3 / 3.0 * v.y) / s),
            HexOrientation::Pointy => ((SQRT_3 / 3.0 * v.x - v.y / 3.0) / s, 2.0 / 3.0 * v.y / s),
        };
        Cube::round(fq, fr, -fq - fr).to_axial()
    }
}

/// Column and row of a cell, counting from zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub col: i32,
    pub row: i32,
}

impl Offset {
    pub const fn new(col: i32, row: i32) -> Offset {
        Offset { col, row }
    }

    pub fn to_axial(self, orientation: HexOrientation, parity: OffsetParity) -> Axial {
        let Offset { col, row } = self;
        match (orientation, parity) {
            (HexOrientation::Flat, OffsetParity::Odd) => Axial::new(col, row - (col - (col & 1)) / 2),
            (HexOrientation::Flat, OffsetParity::Even) => Axial::new(col, row - (col + (col & 1)) / 2),
            (HexOrientation::Pointy, OffsetParity::Odd) => Axial::new(col - (row - (row & 1)) / 2, row),
            (HexOrientation::Pointy, OffsetParity::Even) => Axial::new(col - (row + (row & 1)) / 2, row),
        }
    }
}

/// Axial hex coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Axial {
    pub q: i32,
    pub r: i32,
}

/// The six axial directions, counter-clockwise from the east-most neighbour
/// of a flat hex.
pub const AXIAL_DIRECTIONS: [Axial; 6] = [
    Axial::new(1, 0),
    Axial::new(1, -1),
    Axial::new(0, -1),
    Axial::new(-1, 0),
    Axial::new(-1, 1),
    Axial::new(0, 1),
];

impl Axial {
    pub const fn new(q: i32, r: i32) -> Axial {
        Axial { q, r }
    }

    pub fn to_offset(self, orientation: HexOrientation, parity: OffsetParity) -> Offset {
        let Axial { q, r } = self;
        match (orientation, parity) {
            (HexOrientation::Flat, OffsetParity::Odd) => Offset::new(q, r + (q - (q & 1)) / 2),
            (HexOrientation::Flat, OffsetParity::Even) => Offset::new(q, r + (q + (q & 1)) / 2),
            (HexOrientation::Pointy, OffsetParity::Odd) => Offset::new(q + (r - (r & 1)) / 2, r),
            (HexOrientation::Pointy, OffsetParity::Even) => Offset::new(q + (r + (r & 1)) / 2, r),
        }
    }

    pub fn to_cube(self) -> Cube {
        Cube {
            q: self.q,
            r: self.r,
            s: -self.q - self.r,
        }
    }

    /// The number of steps between two hexes.
    pub fn distance(self, other: Axial) -> u32 {
        let d = self - other;
        (d.q.unsigned_abs() + (d.q + d.r).unsigned_abs() + d.r.unsigned_abs()) / 2
    }

    /// The six adjacent hexes, in [`AXIAL_DIRECTIONS`] order.
    pub fn neighbors(self) -> [Axial; 6] {
        AXIAL_DIRECTIONS.map(|d| self + d)
    }

    /// All hexes exactly `radius` steps away, walking counter-clockwise.
    pub fn ring(self, radius: u32) -> Vec<Axial> {
        if radius == 0 {
            return vec![self];
        }
        let radius = radius as i32;
        let mut results = Vec::with_capacity(6 * radius as usize);
        let mut hex = self + AXIAL_DIRECTIONS[4] * radius;
        for dir in AXIAL_DIRECTIONS {
            for _ in 0..radius {
                results.push(hex);
                hex = hex + dir;
            }
        }
        results
    }

    /// This hex followed by every ring out to `radius`.
    pub fn spiral(self, radius: u32) -> Vec<Axial> {
        (0..=radius).flat_map(|k| self.ring(k)).collect()
    }
}

impl Add for Axial {
    type Output = Axial;

    fn add(self, rhs: Axial) -> Axial {
        Axial::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl Sub for Axial {
    type Output = Axial;

    fn sub(self, rhs: Axial) -> Axial {
        Axial::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl Mul<i32> for Axial {
    type Output = Axial;

    fn mul(self, rhs: i32) -> Axial {
        Axial::new(self.q * rhs, self.r * rhs)
    }
}

/// Cube hex coordinates; `q + r + s == 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cube {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl Cube {
    pub fn to_axial(self) -> Axial {
        Axial::new(self.q, self.r)
    }

    /// Round fractional cube coordinates to the containing hex.
    pub fn round(fq: f64, fr: f64, fs: f64) -> Cube {
        let (mut q, mut r, mut s) = (fq.round(), fr.round(), fs.round());
        let (dq, dr, ds) = ((q - fq).abs(), (r - fr).abs(), (s - fs).abs());
        if dq > dr && dq > ds {
            q = -r - s;
        } else if dr > ds {
            r = -q - s;
        } else {
            s = -q - r;
        }
        Cube {
            q: q as i32,
            r: r as i32,
            s: s as i32,
        }
    }
}

/// How the column part of a hex label is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordKind {
    #[default]
    Numeric,
    /// Spreadsheet style: `A`..`Z`, `AA`, `AB`, ...
    Letter,
}

/// Options for the printed coordinates of hex cells.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCoordStyle {
    pub column: CoordKind,
    /// Minimum width of numeric parts, padded with zeros.
    pub padding: usize,
    pub separator: String,
    /// Added to the zero-based column.
    pub start_col: i32,
    /// Added to the zero-based row.
    pub start_row: i32,
    /// Write the row before the column.
    pub row_first: bool,
}

impl Default for HexCoordStyle {
    fn default() -> Self {
        HexCoordStyle {
            column: CoordKind::Numeric,
            padding: 2,
            separator: String::new(),
            start_col: 1,
            start_row: 1,
            row_first: false,
        }
    }
}

impl HexCoordStyle {
    /// The printed label for a cell, such as `0101` or `A01`.
    pub fn label(&self, offset: Offset) -> String {
        let col = offset.col + self.start_col;
        let row = offset.row + self.start_row;
        let col = match self.column {
            CoordKind::Letter if col >= 1 => column_letters(col as u32),
            _ => pad(col, self.padding),
        };
        let row = pad(row, self.padding);
        if self.row_first {
            format!("{}{}{}", row, self.separator, col)
        } else {
            format!("{}{}{}", col, self.separator, row)
        }
    }
}

fn pad(n: i32, width: usize) -> String {
    if n < 0 {
        format!("-{:0width$}", n.unsigned_abs(), width = width)
    } else {
        format!("{:0width$}", n, width = width)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", HexCoordStyle::default().label(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn sizes_agree() {
        let from_height = HexGeometry::from_height(HexOrientation::Flat, SQRT_3 * 2.0).unwrap();
        let from_side = HexGeometry::from_side(HexOrientation::Flat, 2.0).unwrap();
        let from_diameter = HexGeometry::from_diameter(HexOrientation::Flat, 4.0).unwrap();
        assert!(close(from_height.side(), 2.0));
        assert_eq!(from_side, from_diameter);
        assert!(close(from_side.width(), 4.0));
        assert!(close(from_side.height(), SQRT_3 * 2.0));
        assert!(close(from_side.apothem() * 2.0, from_side.flat_to_flat()));
        assert!(HexGeometry::from_height(HexOrientation::Flat, 0.0).is_err());
    }

    #[test]
    fn pointy_swaps_axes() {
        let hex = HexGeometry::from_side(HexOrientation::Pointy, 2.0).unwrap();
        assert!(close(hex.height(), 4.0));
        assert!(close(hex.width(), SQRT_3 * 2.0));
        assert!(close(hex.row_step(), 3.0));
        assert!(close(hex.shift().x, SQRT_3));
        let top = hex.vertices(Point::ORIGIN)[1];
        assert!(close(top.x, 0.0) && close(top.y, -2.0));
    }

    #[test]
    fn vertices_touch_the_bounding_box() {
        let hex = HexGeometry::from_side(HexOrientation::Flat, 10.0).unwrap();
        let vs = hex.vertices(Point::new(100.0, 100.0));
        let min_x = vs.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let max_y = vs.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        assert!(close(min_x, 90.0));
        assert!(close(max_y, 100.0 + hex.height() / 2.0));
    }

    #[test]
    fn offset_axial_conversions() {
        use HexOrientation::*;
        use OffsetParity::*;
        assert_eq!(Offset::new(1, 0).to_axial(Flat, Odd), Axial::new(1, 0));
        assert_eq!(Offset::new(1, 0).to_axial(Flat, Even), Axial::new(1, -1));
        assert_eq!(Offset::new(3, 2).to_axial(Flat, Odd), Axial::new(3, 1));
        assert_eq!(Offset::new(0, 1).to_axial(Pointy, Odd), Axial::new(0, 1));
        assert_eq!(Offset::new(0, 1).to_axial(Pointy, Even), Axial::new(-1, 1));
        for orientation in [Flat, Pointy] {
            for parity in [Even, Odd] {
                for col in -3..4 {
                    for row in -3..4 {
                        let o = Offset::new(col, row);
                        assert_eq!(o.to_axial(orientation, parity).to_offset(orientation, parity), o);
                    }
                }
            }
        }
    }

    #[test]
    fn neighbours_are_one_step_away() {
        let h = Axial::new(2, -1);
        for n in h.neighbors() {
            assert_eq!(h.distance(n), 1);
        }
        assert_eq!(Axial::new(0, 0).distance(Axial::new(3, -1)), 3);
        assert_eq!(Axial::new(-2, 0).distance(Axial::new(2, -2)), 4);
    }

    #[test]
    fn rings_and_spirals() {
        let c = Axial::new(0, 0);
        assert_eq!(c.ring(0), vec![c]);
        let ring = c.ring(2);
        assert_eq!(ring.len(), 12);
        assert!(ring.iter().all(|h| c.distance(*h) == 2));
        let spiral = c.spiral(2);
        assert_eq!(spiral.len(), 19);
        assert_eq!(spiral[0], c);
    }

    #[test]
    fn pixels_round_to_the_containing_hex() {
        for orientation in [HexOrientation::Flat, HexOrientation::Pointy] {
            let hex = HexGeometry::from_side(orientation, 7.0).unwrap();
            for h in Axial::new(0, 0).spiral(3) {
                let centre = hex.axial_to_pixel(h);
                assert_eq!(hex.pixel_to_axial(centre), h);
                let nudged = centre + Vec2::new(0.3 * hex.side(), -0.2 * hex.side());
                assert_eq!(hex.pixel_to_axial(nudged), h);
            }
        }
    }

    #[test]
    fn cube_round_keeps_the_constraint() {
        let c = Cube::round(0.4, 0.4, -0.8);
        assert_eq!(c.q + c.r + c.s, 0);
        assert_eq!(c.to_axial(), Axial::new(0, 1));
    }

    #[test]
    fn labels() {
        let style = HexCoordStyle::default();
        assert_eq!(style.label(Offset::new(0, 0)), "0101");
        assert_eq!(style.label(Offset::new(11, 4)), "1205");
        let letters = HexCoordStyle {
            column: CoordKind::Letter,
            separator: "-".into(),
            ..HexCoordStyle::default()
        };
        assert_eq!(letters.label(Offset::new(27, 9)), "AB-10");
        let rows_first = HexCoordStyle {
            row_first: true,
            padding: 1,
            ..HexCoordStyle::default()
        };
        assert_eq!(rows_first.label(Offset::new(2, 0)), "13");
        assert_eq!(Offset::new(0, 2).to_string(), "0103");
    }
}
