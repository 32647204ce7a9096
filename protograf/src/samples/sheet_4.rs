//! Triangle and square grids, and a triangular rack of counters.

use crate::geom::polygon_path;
use crate::kurbo::{Point, Size};
use crate::{
    CirclePiece, Color, Direction, Error, Layout, RenderContext, SquareGrid, StrokeStyle, Style,
    TextStyle, TriangleGrid, TriangularLocations,
};

pub const SIZE: Size = Size::new(420., 300.);

pub fn draw<R: RenderContext>(rc: &mut R, _page: usize) -> Result<(), Error> {
    rc.clear(Color::WHITE);

    let triangles = TriangleGrid::new(Point::new(20., 20.), 40., 9, 4)?;
    let up = Style::default().fill(Color::LIGHT_GREY);
    let down = Style::default();
    for cell in triangles.cells() {
        let style = if cell.up { &up } else { &down };
        rc.draw_styled(polygon_path(&cell.vertices), style);
    }

    let rack = TriangularLocations::new(Point::new(320., 50.), 5, 22.)
        .facing(Direction::North)
        .locations()?;
    let ball = CirclePiece::new(10.)?.style(Style::filled(Color::RED));
    let layout = Layout::new(rack);
    layout.draw(rc, std::slice::from_ref(&ball))?;

    let squares = SquareGrid::new(Point::new(20., 190.), 12, 3, Size::new(30., 30.))?;
    let thin = StrokeStyle::new();
    for line in squares.lines() {
        rc.stroke(line, &Color::BLACK, 0.5, &thin);
    }
    let labels = TextStyle::new(8., Color::GREY);
    for (i, rect) in squares.cells().iter().enumerate() {
        rc.draw_text(&(i + 1).to_string(), rect.center(), &labels);
    }
    Ok(())
}
