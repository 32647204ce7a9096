//! A labelled hex map, shaded by distance from the middle hex.

use crate::kurbo::{Point, Size, Vec2};
use crate::{
    Color, CoordKind, Error, HexCoordStyle, HexGeometry, HexGrid, HexOrientation, HexPiece,
    Layout, Offset, OffsetParity, RenderContext, Style, TextStyle,
};

pub const SIZE: Size = Size::new(380., 360.);

pub fn draw<R: RenderContext>(rc: &mut R, _page: usize) -> Result<(), Error> {
    rc.clear(Color::WHITE);
    let geometry = HexGeometry::from_side(HexOrientation::Flat, 24.0)?;
    let grid = HexGrid::new(geometry, 9, 7)
        .origin(Point::new(20., 20.))
        .parity(OffsetParity::Even)
        .coords(HexCoordStyle {
            column: CoordKind::Letter,
            ..HexCoordStyle::default()
        });
    let middle = Offset::new(4, 3).to_axial(geometry.orientation(), grid.parity);

    let pieces = [
        HexPiece::new(geometry).style(Style::default().fill(Color::TAN)),
        HexPiece::new(geometry).style(Style::default().fill(Color::GREEN.with_alpha(0.5))),
        HexPiece::new(geometry).style(Style::default().fill(Color::RED)),
    ];
    let shapes = grid
        .cells()?
        .iter()
        .map(|cell| match cell.axial.distance(middle) {
            0 => 2,
            1 | 2 => 1,
            _ => 0,
        })
        .collect();
    let layout = Layout::from_hex_grid(&grid)?.shapes(shapes);
    layout.draw(rc, &pieces)?;

    let coords = TextStyle::new(7.0, Color::BLACK);
    layout.draw_labels(rc, &coords, Vec2::new(0., -0.3 * geometry.height()));
    Ok(())
}
