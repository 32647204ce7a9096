//! Locations and layouts.
//!
//! A location generator produces an ordered list of [`Locale`]s; a [`Layout`]
//! then decides which piece, if any, is drawn at each one.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use kurbo::{Point, Vec2};

use crate::error::ensure_positive;
use crate::geom::SQRT_3;
use crate::grid::HexGrid;
use crate::{Error, Piece, RenderContext, TextStyle};

/// A place in a layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Locale {
    /// Column, counting from 1.
    pub col: u32,
    /// Row, counting from 1.
    pub row: u32,
    /// Position in traversal order, counting from 1.
    pub id: usize,
    pub point: Point,
    pub label: String,
}

/// Replace the default `col,row` labels of a set of locations.
pub fn relabel(locations: &mut [Locale], f: impl Fn(&Locale) -> String) {
    for locale in locations.iter_mut() {
        locale.label = f(locale);
    }
}

/// A corner of a rectangular arrangement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Corner {
    #[default]
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

/// A compass direction on the page; north is up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    #[default]
    East,
    West,
}

/// The order in which a rectangular arrangement is visited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pattern {
    /// Parallel lines, each starting from the same side.
    #[default]
    Default,
    /// Parallel lines, alternating direction.
    Snake,
    /// Only the perimeter, walked from the start corner.
    Outer,
    /// The perimeter, then each inner ring in turn.
    Spiral,
}

impl Direction {
    /// Column and row step of one move in this direction.
    fn step(self) -> (i64, i64) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// Unit vector in page space.
    pub fn vector(self) -> Vec2 {
        let (dx, dy) = self.step();
        Vec2::new(dx as f64, dy as f64)
    }

    /// A quarter turn clockwise, as seen on the page.
    pub fn clockwise(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// A quarter turn anticlockwise, as seen on the page.
    pub fn anticlockwise(self) -> Direction {
        self.clockwise().clockwise().clockwise()
    }
}

impl Corner {
    /// The two directions that lead away from this corner along an edge.
    pub fn exits(self) -> [Direction; 2] {
        match self {
            Corner::NorthWest => [Direction::East, Direction::South],
            Corner::NorthEast => [Direction::West, Direction::South],
            Corner::SouthWest => [Direction::East, Direction::North],
            Corner::SouthEast => [Direction::West, Direction::North],
        }
    }
}

impl FromStr for Corner {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "nw" | "northwest" => Ok(Corner::NorthWest),
            "ne" | "northeast" => Ok(Corner::NorthEast),
            "sw" | "southwest" => Ok(Corner::SouthWest),
            "se" | "southeast" => Ok(Corner::SouthEast),
            _ => Err(Error::InvalidArgs(format!("unknown corner '{}'", s))),
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Direction::North),
            "s" | "south" => Ok(Direction::South),
            "e" | "east" => Ok(Direction::East),
            "w" | "west" => Ok(Direction::West),
            _ => Err(Error::InvalidArgs(format!("unknown direction '{}'", s))),
        }
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" | "d" => Ok(Pattern::Default),
            "snake" | "s" => Ok(Pattern::Snake),
            "outer" | "o" => Ok(Pattern::Outer),
            "spiral" | "inner" => Ok(Pattern::Spiral),
            _ => Err(Error::InvalidArgs(format!("unknown pattern '{}'", s))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Extra displacement for alternate rows and columns, such as a brick pattern.
///
/// Parity counts rows and columns from 1.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowColOffsets {
    /// Horizontal shift of odd rows.
    pub row_odd: f64,
    /// Horizontal shift of even rows.
    pub row_even: f64,
    /// Vertical shift of odd columns.
    pub col_odd: f64,
    /// Vertical shift of even columns.
    pub col_even: f64,
}

impl RowColOffsets {
    fn displacement(&self, col: u32, row: u32) -> Vec2 {
        let dx = if row % 2 == 1 { self.row_odd } else { self.row_even };
        let dy = if col % 2 == 1 { self.col_odd } else { self.col_even };
        Vec2::new(dx, dy)
    }
}

/// Regularly spaced locations in columns and rows.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectangularLocations {
    /// Position of column 1, row 1 (the top-left location).
    pub origin: Point,
    pub cols: u32,
    pub rows: u32,
    /// Distance between adjacent columns (x) and rows (y).
    pub interval: Vec2,
    pub start: Corner,
    pub direction: Direction,
    pub pattern: Pattern,
    pub offsets: RowColOffsets,
}

impl RectangularLocations {
    pub fn new(origin: Point, cols: u32, rows: u32, interval: f64) -> RectangularLocations {
        RectangularLocations {
            origin,
            cols,
            rows,
            interval: Vec2::new(interval, interval),
            start: Corner::default(),
            direction: Direction::default(),
            pattern: Pattern::default(),
            offsets: RowColOffsets::default(),
        }
    }

    pub fn interval(mut self, x: f64, y: f64) -> Self {
        self.interval = Vec2::new(x, y);
        self
    }

    /// Start in `corner` heading `direction`.
    pub fn start(mut self, corner: Corner, direction: Direction) -> Self {
        self.start = corner;
        self.direction = direction;
        self
    }

    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn offsets(mut self, offsets: RowColOffsets) -> Self {
        self.offsets = offsets;
        self
    }

    fn validate(&self) -> Result<(), Error> {
        if self.cols == 0 || self.rows == 0 {
            return Err(Error::EmptyGrid);
        }
        ensure_positive("column interval", self.interval.x)?;
        ensure_positive("row interval", self.interval.y)?;
        if !self.start.exits().contains(&self.direction) {
            return Err(Error::IncompatibleDirection {
                start: self.start,
                direction: self.direction,
            });
        }
        Ok(())
    }

    fn corner_cell(&self) -> (i64, i64) {
        let (c, r) = (self.cols as i64, self.rows as i64);
        match self.start {
            Corner::NorthWest => (1, 1),
            Corner::NorthEast => (c, 1),
            Corner::SouthWest => (1, r),
            Corner::SouthEast => (c, r),
        }
    }

    /// The direction that moves from one line to the next.
    fn across(&self) -> Direction {
        let [a, b] = self.start.exits();
        if a == self.direction {
            b
        } else {
            a
        }
    }

    fn in_bounds(&self, (c, r): (i64, i64)) -> bool {
        c >= 1 && r >= 1 && c <= self.cols as i64 && r <= self.rows as i64
    }

    fn on_perimeter(&self, (c, r): (i64, i64)) -> bool {
        c == 1 || r == 1 || c == self.cols as i64 || r == self.rows as i64
    }

    /// The `(col, row)` pairs in traversal order.
    pub fn order(&self) -> Result<Vec<(u32, u32)>, Error> {
        self.validate()?;
        let cells = match self.pattern {
            Pattern::Default => self.lines(false),
            Pattern::Snake => self.lines(true),
            Pattern::Spiral => self.spiral(),
            Pattern::Outer => {
                let spiral = self.spiral();
                spiral
                    .into_iter()
                    .take_while(|cell| self.on_perimeter(*cell))
                    .collect()
            }
        };
        Ok(cells
            .into_iter()
            .map(|(c, r)| (c as u32, r as u32))
            .collect())
    }

    fn lines(&self, snake: bool) -> Vec<(i64, i64)> {
        let along = self.direction.step();
        let across = self.across().step();
        let (line_len, line_count) = match self.direction {
            Direction::East | Direction::West => (self.cols as i64, self.rows as i64),
            Direction::North | Direction::South => (self.rows as i64, self.cols as i64),
        };
        let (c0, r0) = self.corner_cell();
        let mut out = Vec::with_capacity((line_len * line_count) as usize);
        for k in 0..line_count {
            let (lc, lr) = (c0 + k * across.0, r0 + k * across.1);
            for i in 0..line_len {
                let i = if snake && k % 2 == 1 { line_len - 1 - i } else { i };
                out.push((lc + i * along.0, lr + i * along.1));
            }
        }
        out
    }

    /// Walk in the current direction until blocked by the edge or a visited
    /// cell, then turn towards the interior; stop when the turn is blocked too.
    fn spiral(&self) -> Vec<(i64, i64)> {
        let total = self.cols as usize * self.rows as usize;
        let turn: fn(Direction) -> Direction = if self.direction.clockwise() == self.across() {
            Direction::clockwise
        } else {
            Direction::anticlockwise
        };
        let mut visited = HashSet::with_capacity(total);
        let mut pos = self.corner_cell();
        let mut dir = self.direction;
        let mut out = Vec::with_capacity(total);
        visited.insert(pos);
        out.push(pos);
        let free = |p: (i64, i64), visited: &HashSet<(i64, i64)>| {
            self.in_bounds(p) && !visited.contains(&p)
        };
        loop {
            let (dc, dr) = dir.step();
            let next = (pos.0 + dc, pos.1 + dr);
            if free(next, &visited) {
                pos = next;
            } else {
                dir = turn(dir);
                let (dc, dr) = dir.step();
                let next = (pos.0 + dc, pos.1 + dr);
                if !free(next, &visited) {
                    break;
                }
                pos = next;
            }
            visited.insert(pos);
            out.push(pos);
        }
        out
    }

    /// The page position of a location, before traversal order is applied.
    pub fn point(&self, col: u32, row: u32) -> Point {
        self.origin
            + Vec2::new(
                (col - 1) as f64 * self.interval.x,
                (row - 1) as f64 * self.interval.y,
            )
            + self.offsets.displacement(col, row)
    }

    pub fn locations(&self) -> Result<Vec<Locale>, Error> {
        let locations: Vec<Locale> = self
            .order()?
            .into_iter()
            .enumerate()
            .map(|(i, (col, row))| Locale {
                col,
                row,
                id: i + 1,
                point: self.point(col, row),
                label: format!("{},{}", col, row),
            })
            .collect();
        log::debug!(
            "{:?} pattern from {:?} heading {} gives {} locations",
            self.pattern,
            self.start,
            self.direction,
            locations.len()
        );
        Ok(locations)
    }
}

/// Locations arranged in a triangle, like a rack of pool balls.
///
/// Row `k` holds `k` locations, `interval` apart and centred on the axis;
/// the apex (row 1) points in the `facing` direction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriangularLocations {
    pub apex: Point,
    pub rows: u32,
    pub interval: f64,
    pub facing: Direction,
}

impl TriangularLocations {
    pub fn new(apex: Point, rows: u32, interval: f64) -> TriangularLocations {
        TriangularLocations {
            apex,
            rows,
            interval,
            facing: Direction::North,
        }
    }

    pub fn facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self
    }

    pub fn locations(&self) -> Result<Vec<Locale>, Error> {
        if self.rows == 0 {
            return Err(Error::EmptyGrid);
        }
        let interval = ensure_positive("interval", self.interval)?;
        let forward = self.facing.vector();
        let right = Vec2::new(-forward.y, forward.x);
        let depth = interval * SQRT_3 / 2.0;
        let mut out = Vec::new();
        for row in 1..=self.rows {
            let behind = (row - 1) as f64 * depth;
            for col in 1..=row {
                let lateral = (col as f64 - 1.0 - (row as f64 - 1.0) / 2.0) * interval;
                out.push(Locale {
                    col,
                    row,
                    id: out.len() + 1,
                    point: self.apex - forward * behind + right * lateral,
                    label: format!("{},{}", col, row),
                });
            }
        }
        Ok(out)
    }
}

/// Where one piece of a layout is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// The [`Locale::id`] of the location.
    pub id: usize,
    pub point: Point,
    /// Degrees, counter-clockwise on the page.
    pub rotation: f64,
    /// Index into the pieces passed to [`Layout::draw`].
    pub piece: usize,
    pub label: String,
}

/// Pieces distributed over a set of locations.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    locations: Vec<Locale>,
    /// Piece indices assigned cyclically to the visible locations; empty
    /// means every piece in turn.
    pub shapes: Vec<usize>,
    /// Location ids that receive nothing.
    pub masked: Vec<usize>,
    /// If set, only these location ids receive pieces.
    pub visible: Option<Vec<usize>>,
    /// Per-location rotation, in degrees.
    pub rotations: Vec<(usize, f64)>,
}

impl Layout {
    pub fn new(locations: Vec<Locale>) -> Layout {
        Layout {
            locations,
            shapes: Vec::new(),
            masked: Vec::new(),
            visible: None,
            rotations: Vec::new(),
        }
    }

    /// A layout over every cell of a hex grid, in the grid's own order.
    pub fn from_hex_grid(grid: &HexGrid) -> Result<Layout, Error> {
        let locations = grid
            .cells()?
            .into_iter()
            .map(|cell| Locale {
                col: (cell.offset.col + 1) as u32,
                row: (cell.offset.row + 1) as u32,
                id: cell.sequence,
                point: cell.centre,
                label: cell.label,
            })
            .collect();
        Ok(Layout::new(locations))
    }

    pub fn locations(&self) -> &[Locale] {
        &self.locations
    }

    pub fn shapes(mut self, shapes: Vec<usize>) -> Self {
        self.shapes = shapes;
        self
    }

    pub fn masked(mut self, masked: Vec<usize>) -> Self {
        self.masked = masked;
        self
    }

    pub fn visible(mut self, visible: Vec<usize>) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn rotate(mut self, id: usize, angle: f64) -> Self {
        self.rotations.push((id, angle));
        self
    }

    /// Decide which of `piece_count` pieces goes where.
    pub fn placements(&self, piece_count: usize) -> Result<Vec<Placement>, Error> {
        if piece_count == 0 {
            return Err(Error::EmptyGrid);
        }
        let shapes: Vec<usize> = if self.shapes.is_empty() {
            (0..piece_count).collect()
        } else {
            self.shapes.clone()
        };
        if let Some(bad) = shapes.iter().find(|&&s| s >= piece_count) {
            return Err(Error::InvalidArgs(format!(
                "shape index {} but only {} pieces",
                bad, piece_count
            )));
        }
        let known: HashSet<usize> = self.locations.iter().map(|l| l.id).collect();
        for id in self.masked.iter().filter(|id| !known.contains(id)) {
            log::warn!("masked location {} is not in the layout", id);
        }
        let masked: HashSet<usize> = self.masked.iter().copied().collect();
        let visible: Option<HashSet<usize>> =
            self.visible.as_ref().map(|v| v.iter().copied().collect());
        let rotations: HashMap<usize, f64> = self.rotations.iter().copied().collect();

        Ok(self
            .locations
            .iter()
            .filter(|l| !masked.contains(&l.id))
            .filter(|l| visible.as_ref().map_or(true, |v| v.contains(&l.id)))
            .enumerate()
            .map(|(i, l)| Placement {
                id: l.id,
                point: l.point,
                rotation: rotations.get(&l.id).copied().unwrap_or(0.0),
                piece: shapes[i % shapes.len()],
                label: l.label.clone(),
            })
            .collect())
    }

    /// Draw each placed piece.
    pub fn draw<R: RenderContext, P: Piece>(&self, ctx: &mut R, pieces: &[P]) -> Result<(), Error> {
        for placement in self.placements(pieces.len())? {
            pieces[placement.piece].draw(ctx, placement.point, placement.rotation)?;
        }
        Ok(())
    }

    /// Write each location's label, offset from its point.
    ///
    /// Masked and hidden locations are labelled too.
    pub fn draw_labels<R: RenderContext>(&self, ctx: &mut R, style: &TextStyle, offset: Vec2) {
        for locale in &self.locations {
            ctx.draw_text(&locale.label, locale.point + offset, style);
        }
    }
}
