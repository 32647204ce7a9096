//! Pieces following tracks, with each rotation style.

use crate::kurbo::{Point, Rect, Size};
use crate::{
    Color, Error, HexGeometry, HexOrientation, PolygonPiece, RectPiece, RenderContext,
    RotationStyle, Spacing, Style, TextStyle, Track, TrackPath,
};

pub const SIZE: Size = Size::new(480., 420.);

pub fn draw<R: RenderContext>(rc: &mut R, _page: usize) -> Result<(), Error> {
    rc.clear(Color::WHITE);
    let guide = Style::outline(Color::GREY, 1.0);
    let arrow = PolygonPiece::new(3, 8.)?.style(Style::filled(Color::BLUE));

    let square = TrackPath::rect(Rect::new(30., 30., 210., 210.));
    rc.draw_styled(square.outline(), &guide);
    Track::new(square)
        .spacing(Spacing::Count(12))
        .rotation(RotationStyle::Along)
        .draw(rc, &arrow)?;

    let circle = TrackPath::circle(Point::new(360., 120.), 90.);
    rc.draw_styled(circle.outline(), &guide);
    let tile = RectPiece::new(Size::new(14., 22.))?
        .rounding(3.)
        .style(Style::default().fill(Color::LIGHT_GREY));
    Track::new(circle)
        .spacing(Spacing::Count(10))
        .rotation(RotationStyle::Outwards)
        .draw(rc, &tile)?;

    let centre = Point::new(120., 320.);
    let hex = HexGeometry::from_radius(HexOrientation::Pointy, 80.)?;
    let hexagon = TrackPath::hexagon(&hex, centre);
    rc.draw_styled(hexagon.outline(), &guide);
    let around = Track::new(hexagon)
        .start(1)
        .clockwise(false)
        .rotation(RotationStyle::Inwards);
    around.draw(rc, &arrow)?;
    let numbers = TextStyle::new(9., Color::BLACK);
    for p in around.points()? {
        let label_at = p.point + (p.point - centre) * 0.15;
        rc.draw_text(&p.index.to_string(), label_at, &numbers);
    }

    let zigzag = TrackPath::Polyline(vec![
        Point::new(250., 260.),
        Point::new(300., 380.),
        Point::new(360., 260.),
        Point::new(420., 380.),
        Point::new(460., 300.),
    ]);
    rc.draw_styled(zigzag.outline(), &guide);
    Track::new(zigzag)
        .spacing(Spacing::Interval(25.))
        .rotation(RotationStyle::Along)
        .draw(rc, &arrow)?;
    Ok(())
}
