//! The four rectangular traversal patterns, numbered in visiting order.

use crate::geom::polyline_path;
use crate::kurbo::{Point, Size, Vec2};
use crate::{
    relabel, CirclePiece, Color, Corner, Direction, Error, Layout, Pattern, RectangularLocations,
    RenderContext, StrokeStyle, Style, TextStyle,
};

pub const SIZE: Size = Size::new(400., 300.);

const PANELS: [(Pattern, Corner, Direction); 4] = [
    (Pattern::Default, Corner::NorthWest, Direction::East),
    (Pattern::Snake, Corner::SouthWest, Direction::North),
    (Pattern::Outer, Corner::NorthEast, Direction::West),
    (Pattern::Spiral, Corner::NorthWest, Direction::South),
];

pub fn draw<R: RenderContext>(rc: &mut R, _page: usize) -> Result<(), Error> {
    rc.clear(Color::WHITE);
    let counter = CirclePiece::new(9.)?.style(Style::default().fill(Color::YELLOW));
    let dashed = StrokeStyle::new().dash(vec![3., 2.], 0.);
    let title = TextStyle::new(10., Color::BLACK);
    let numbers = TextStyle::new(8., Color::BLACK);

    for (i, (pattern, corner, direction)) in PANELS.into_iter().enumerate() {
        let origin = Point::new(40. + (i % 2) as f64 * 190., 50. + (i / 2) as f64 * 140.);
        let mut locations = RectangularLocations::new(origin, 5, 4, 30.)
            .start(corner, direction)
            .pattern(pattern)
            .locations()?;
        relabel(&mut locations, |l| l.id.to_string());

        let route: Vec<Point> = locations.iter().map(|l| l.point).collect();
        rc.stroke(polyline_path(&route), &Color::GREY, 1.0, &dashed);

        let layout = Layout::new(locations);
        layout.draw(rc, std::slice::from_ref(&counter))?;
        layout.draw_labels(rc, &numbers, Vec2::ZERO);
        rc.draw_text(&format!("{:?}", pattern), origin + Vec2::new(60., -25.), &title);
    }
    Ok(())
}
