//! Virtual grids: hexagonal, square and triangular tessellations.
//!
//! A grid only computes where its cells are; drawing is left to the caller or
//! to a [`Layout`](crate::Layout).

use kurbo::{Line, Point, Rect, Size, Vec2};

use crate::error::ensure_positive;
use crate::geom::SQRT_3;
use crate::hex::{Axial, HexCoordStyle, HexGeometry, HexOrientation, Offset, OffsetParity};
use crate::Error;

/// The overall outline of a hex grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HexGridShape {
    /// Every cell in `cols` x `rows`.
    #[default]
    Rectangle,
    /// A large hexagon: the cells within `rows / 2` steps of the middle cell.
    /// Needs an equal, odd number of rows and columns.
    Hexagonal,
}

/// A cell of a [`HexGrid`].
#[derive(Clone, Debug, PartialEq)]
pub struct HexCell {
    pub offset: Offset,
    pub axial: Axial,
    pub centre: Point,
    pub label: String,
    /// Position in the grid's row-major order, counting from 1.
    pub sequence: usize,
}

/// A grid of hexagons laid out in offset columns and rows.
#[derive(Clone, Debug, PartialEq)]
pub struct HexGrid {
    pub geometry: HexGeometry,
    pub parity: OffsetParity,
    pub cols: u32,
    pub rows: u32,
    /// Top-left of the bounding box of cell `(0, 0)`, before any shift.
    pub origin: Point,
    pub shape: HexGridShape,
    pub coords: HexCoordStyle,
}

impl HexGrid {
    pub fn new(geometry: HexGeometry, cols: u32, rows: u32) -> HexGrid {
        HexGrid {
            geometry,
            parity: OffsetParity::default(),
            cols,
            rows,
            origin: Point::ORIGIN,
            shape: HexGridShape::default(),
            coords: HexCoordStyle::default(),
        }
    }

    pub fn origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn parity(mut self, parity: OffsetParity) -> Self {
        self.parity = parity;
        self
    }

    pub fn shape(mut self, shape: HexGridShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn coords(mut self, coords: HexCoordStyle) -> Self {
        self.coords = coords;
        self
    }

    fn orientation(&self) -> HexOrientation {
        self.geometry.orientation()
    }

    /// The centre of a cell, which need not be inside the grid.
    pub fn centre(&self, offset: Offset) -> Point {
        let g = &self.geometry;
        let base = self.origin
            + Vec2::new(g.width() / 2.0, g.height() / 2.0)
            + Vec2::new(offset.col as f64 * g.column_step(), offset.row as f64 * g.row_step());
        let line = match self.orientation() {
            HexOrientation::Flat => offset.col,
            HexOrientation::Pointy => offset.row,
        };
        if self.parity.is_shifted(line) {
            base + g.shift()
        } else {
            base
        }
    }

    /// The cell under a point, which need not be inside the grid.
    pub fn offset_at(&self, point: Point) -> Offset {
        let local = point - self.centre(Offset::new(0, 0));
        self.geometry
            .pixel_to_axial(local)
            .to_offset(self.orientation(), self.parity)
    }

    /// Whether an offset names a cell of this grid.
    pub fn contains(&self, offset: Offset) -> bool {
        let in_box = offset.col >= 0
            && offset.row >= 0
            && (offset.col as u32) < self.cols
            && (offset.row as u32) < self.rows;
        match self.shape {
            HexGridShape::Rectangle => in_box,
            HexGridShape::Hexagonal => {
                in_box && self.axial(offset).distance(self.axial(self.middle())) <= self.rows / 2
            }
        }
    }

    /// The cells of this grid adjacent to `offset`.
    pub fn neighbors(&self, offset: Offset) -> Vec<Offset> {
        self.axial(offset)
            .neighbors()
            .into_iter()
            .map(|a| a.to_offset(self.orientation(), self.parity))
            .filter(|o| self.contains(*o))
            .collect()
    }

    /// Every cell, in row-major order.
    pub fn cells(&self) -> Result<Vec<HexCell>, Error> {
        if self.cols == 0 || self.rows == 0 {
            return Err(Error::EmptyGrid);
        }
        if self.shape == HexGridShape::Hexagonal && (self.cols != self.rows || self.rows % 2 == 0)
        {
            return Err(Error::InvalidSpacing(
                "a hexagonal grid needs the same odd number of rows and columns",
            ));
        }
        let cells: Vec<HexCell> = (0..self.rows as i32)
            .flat_map(|row| (0..self.cols as i32).map(move |col| Offset::new(col, row)))
            .filter(|o| self.contains(*o))
            .enumerate()
            .map(|(i, offset)| HexCell {
                offset,
                axial: self.axial(offset),
                centre: self.centre(offset),
                label: self.coords.label(offset),
                sequence: i + 1,
            })
            .collect();
        log::debug!(
            "hex grid {}x{} ({:?}) has {} cells",
            self.cols,
            self.rows,
            self.shape,
            cells.len()
        );
        Ok(cells)
    }

    /// The bounding box of every cell outline.
    pub fn bounds(&self) -> Result<Rect, Error> {
        let cells = self.cells()?;
        let half = Vec2::new(self.geometry.width() / 2.0, self.geometry.height() / 2.0);
        Ok(cells
            .iter()
            .map(|c| Rect::from_points(c.centre - half, c.centre + half))
            .reduce(|a, b| a.union(b))
            .unwrap_or_default())
    }

    fn axial(&self, offset: Offset) -> Axial {
        offset.to_axial(self.orientation(), self.parity)
    }

    fn middle(&self) -> Offset {
        Offset::new(self.cols as i32 / 2, self.rows as i32 / 2)
    }
}

/// A rectangular grid of equal cells.
#[derive(Clone, Debug, PartialEq)]
pub struct SquareGrid {
    pub origin: Point,
    pub cols: u32,
    pub rows: u32,
    pub cell: Size,
}

impl SquareGrid {
    pub fn new(origin: Point, cols: u32, rows: u32, cell: Size) -> Result<SquareGrid, Error> {
        if cols == 0 || rows == 0 {
            return Err(Error::EmptyGrid);
        }
        ensure_positive("cell width", cell.width)?;
        ensure_positive("cell height", cell.height)?;
        Ok(SquareGrid {
            origin,
            cols,
            rows,
            cell,
        })
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(
            self.origin,
            Size::new(
                self.cols as f64 * self.cell.width,
                self.rows as f64 * self.cell.height,
            ),
        )
    }

    /// The ruled lines of the grid: vertical lines left to right, then
    /// horizontal lines top to bottom.
    pub fn lines(&self) -> Vec<Line> {
        let b = self.bounds();
        let verticals = (0..=self.cols).map(|c| {
            let x = b.x0 + c as f64 * self.cell.width;
            Line::new((x, b.y0), (x, b.y1))
        });
        let horizontals = (0..=self.rows).map(|r| {
            let y = b.y0 + r as f64 * self.cell.height;
            Line::new((b.x0, y), (b.x1, y))
        });
        verticals.chain(horizontals).collect()
    }

    /// The rectangle of the cell at zero-based `col`, `row`.
    pub fn cell(&self, col: u32, row: u32) -> Rect {
        let p = self.origin
            + Vec2::new(col as f64 * self.cell.width, row as f64 * self.cell.height);
        Rect::from_origin_size(p, self.cell)
    }

    pub fn centre(&self, col: u32, row: u32) -> Point {
        self.cell(col, row).center()
    }

    /// Every cell, in row-major order.
    pub fn cells(&self) -> Vec<Rect> {
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (col, row)))
            .map(|(col, row)| self.cell(col, row))
            .collect()
    }
}

/// A cell of a [`TriangleGrid`].
#[derive(Clone, Debug, PartialEq)]
pub struct TriangleCell {
    pub col: u32,
    pub row: u32,
    /// Whether the triangle has its apex at the top.
    pub up: bool,
    pub vertices: [Point; 3],
    pub centroid: Point,
}

/// A tessellation of equilateral triangles.
///
/// Each row is a strip of alternately up- and down-pointing triangles; cell
/// `(col, row)` points up when `col + row` is even.
#[derive(Clone, Debug, PartialEq)]
pub struct TriangleGrid {
    pub origin: Point,
    pub side: f64,
    pub cols: u32,
    pub rows: u32,
}

impl TriangleGrid {
    pub fn new(origin: Point, side: f64, cols: u32, rows: u32) -> Result<TriangleGrid, Error> {
        if cols == 0 || rows == 0 {
            return Err(Error::EmptyGrid);
        }
        let side = ensure_positive("triangle side", side)?;
        Ok(TriangleGrid {
            origin,
            side,
            cols,
            rows,
        })
    }

    pub fn row_height(&self) -> f64 {
        self.side * SQRT_3 / 2.0
    }

    pub fn cell(&self, col: u32, row: u32) -> TriangleCell {
        let h = self.row_height();
        let x = self.origin.x + col as f64 * self.side / 2.0;
        let y = self.origin.y + row as f64 * h;
        let up = (col + row) % 2 == 0;
        let vertices = if up {
            [
                Point::new(x, y + h),
                Point::new(x + self.side, y + h),
                Point::new(x + self.side / 2.0, y),
            ]
        } else {
            [
                Point::new(x, y),
                Point::new(x + self.side, y),
                Point::new(x + self.side / 2.0, y + h),
            ]
        };
        let [a, b, c] = vertices;
        let centroid = Point::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0);
        TriangleCell {
            col,
            row,
            up,
            vertices,
            centroid,
        }
    }

    /// Every cell, in row-major order.
    pub fn cells(&self) -> Vec<TriangleCell> {
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (col, row)))
            .map(|(col, row)| self.cell(col, row))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(side: f64) -> HexGeometry {
        HexGeometry::from_side(HexOrientation::Flat, side).unwrap()
    }

    fn assert_near(a: Point, b: Point) {
        assert!(a.distance(b) < 1e-9, "{:?} != {:?}", a, b);
    }

    #[test]
    fn flat_columns_interlock() {
        let grid = HexGrid::new(flat(10.0), 3, 2);
        let h = grid.geometry.height();
        assert_near(grid.centre(Offset::new(0, 0)), Point::new(10.0, h / 2.0));
        // odd columns are pushed down by half a hex
        assert_near(grid.centre(Offset::new(1, 0)), Point::new(25.0, h));
        assert_near(grid.centre(Offset::new(2, 1)), Point::new(40.0, 1.5 * h));
    }

    #[test]
    fn even_parity_shifts_the_first_column() {
        let grid = HexGrid::new(flat(10.0), 3, 2).parity(OffsetParity::Even);
        let h = grid.geometry.height();
        assert_near(grid.centre(Offset::new(0, 0)), Point::new(10.0, h));
        assert_near(grid.centre(Offset::new(1, 0)), Point::new(25.0, h / 2.0));
    }

    #[test]
    fn adjacent_centres_are_one_flat_apart() {
        for orientation in [HexOrientation::Flat, HexOrientation::Pointy] {
            for parity in [OffsetParity::Even, OffsetParity::Odd] {
                let g = HexGeometry::from_side(orientation, 5.0).unwrap();
                let grid = HexGrid::new(g, 5, 5).parity(parity);
                let o = Offset::new(2, 2);
                let c = grid.centre(o);
                let ns = grid.neighbors(o);
                assert_eq!(ns.len(), 6);
                for n in ns {
                    let d = c.distance(grid.centre(n));
                    assert!((d - g.flat_to_flat()).abs() < 1e-9, "{:?} {:?}", orientation, parity);
                }
            }
        }
    }

    #[test]
    fn points_find_their_cell() {
        for orientation in [HexOrientation::Flat, HexOrientation::Pointy] {
            for parity in [OffsetParity::Even, OffsetParity::Odd] {
                let g = HexGeometry::from_side(orientation, 12.0).unwrap();
                let grid = HexGrid::new(g, 4, 4)
                    .parity(parity)
                    .origin(Point::new(30.0, 40.0));
                for cell in grid.cells().unwrap() {
                    assert_eq!(grid.offset_at(cell.centre), cell.offset);
                    assert_eq!(grid.offset_at(cell.centre + Vec2::new(3.0, 4.0)), cell.offset);
                }
            }
        }
    }

    #[test]
    fn rectangle_cells_are_row_major() {
        let grid = HexGrid::new(flat(10.0), 3, 2);
        let cells = grid.cells().unwrap();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[1].offset, Offset::new(1, 0));
        assert_eq!(cells[3].offset, Offset::new(0, 1));
        assert_eq!(cells[3].label, "0102");
        assert_eq!(cells[5].sequence, 6);
    }

    #[test]
    fn hexagonal_grid() {
        let grid = HexGrid::new(flat(10.0), 5, 5).shape(HexGridShape::Hexagonal);
        let cells = grid.cells().unwrap();
        assert_eq!(cells.len(), 19);
        let bad = HexGrid::new(flat(10.0), 4, 4).shape(HexGridShape::Hexagonal);
        assert!(matches!(bad.cells(), Err(Error::InvalidSpacing(_))));
        assert!(matches!(
            HexGrid::new(flat(10.0), 0, 3).cells(),
            Err(Error::EmptyGrid)
        ));
    }

    #[test]
    fn bounds_cover_the_shifted_column() {
        let grid = HexGrid::new(flat(10.0), 2, 1);
        let h = grid.geometry.height();
        let b = grid.bounds().unwrap();
        assert!((b.x0 - 0.0).abs() < 1e-9);
        assert!((b.x1 - 35.0).abs() < 1e-9);
        assert!((b.y1 - 1.5 * h).abs() < 1e-9);
    }

    #[test]
    fn square_grid_lines() {
        let grid = SquareGrid::new(Point::new(10.0, 10.0), 3, 2, Size::new(20.0, 30.0)).unwrap();
        let lines = grid.lines();
        assert_eq!(lines.len(), 4 + 3);
        assert_eq!(lines[3], Line::new((70.0, 10.0), (70.0, 70.0)));
        assert_eq!(lines[6], Line::new((10.0, 70.0), (70.0, 70.0)));
        assert_eq!(grid.centre(1, 1), Point::new(40.0, 55.0));
        assert_eq!(grid.cells().len(), 6);
        assert!(SquareGrid::new(Point::ORIGIN, 0, 2, Size::new(1.0, 1.0)).is_err());
    }

    #[test]
    fn triangles_alternate() {
        let grid = TriangleGrid::new(Point::ORIGIN, 10.0, 4, 2).unwrap();
        let cells = grid.cells();
        assert_eq!(cells.len(), 8);
        assert!(cells[0].up);
        assert!(!cells[1].up);
        assert!(!cells[4].up);
        for cell in &cells {
            let [a, b, c] = cell.vertices;
            for (p, q) in [(a, b), (b, c), (c, a)] {
                assert!((p.distance(q) - 10.0).abs() < 1e-9);
            }
        }
        // neighbours share an edge
        assert_eq!(cells[0].vertices[2], cells[1].vertices[0]);
        assert_eq!(cells[0].vertices[1], cells[1].vertices[2]);
    }
}
