//! A small hex map with a ring of counters, written to stdout as SVG.

use std::io;

use protograf::kurbo::{Point, Size, Vec2};
use protograf::{
    CirclePiece, Color, HexGeometry, HexGrid, HexOrientation, HexPiece, Layout, Offset,
    Piece, RenderContext, Style, TextStyle,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let geometry = HexGeometry::from_side(HexOrientation::Pointy, 20.0)?;
    let grid = HexGrid::new(geometry, 7, 6).origin(Point::new(10., 10.));
    let bounds = grid.bounds()?;
    let mut rc = protograf_svg::RenderContext::new(Size::new(bounds.x1 + 10., bounds.y1 + 10.));
    rc.clear(Color::WHITE);

    let layout = Layout::from_hex_grid(&grid)?;
    layout.draw(&mut rc, &[HexPiece::new(geometry)])?;
    layout.draw_labels(&mut rc, &TextStyle::new(6., Color::GREY), Vec2::new(0., -12.));

    let middle = Offset::new(3, 2).to_axial(geometry.orientation(), grid.parity);
    let counter = CirclePiece::new(8.)?.style(Style::filled(Color::RED));
    for hex in middle.ring(2) {
        let offset = hex.to_offset(geometry.orientation(), grid.parity);
        if grid.contains(offset) {
            counter.draw(&mut rc, grid.centre(offset), 0.)?;
        }
    }

    rc.finish()?;
    rc.write(io::stdout())?;
    Ok(())
}
