//! Things that can be placed by layouts and tracks.

use kurbo::{Affine, Circle, Point, Rect, RoundedRect, Shape, Size, Vec2};

use crate::error::ensure_positive;
use crate::geom::{polygon_path, polygon_vertices};
use crate::hex::HexGeometry;
use crate::{Error, RenderContext, Style, TextStyle};

/// Something that can be drawn centred on a point.
pub trait Piece {
    /// Draw the piece centred on `centre`, turned `rotation` degrees
    /// counter-clockwise on the page.
    ///
    /// Implementations must leave the transform as they found it.
    fn draw<R: RenderContext>(&self, ctx: &mut R, centre: Point, rotation: f64)
        -> Result<(), Error>;

    /// The unrotated extent of the piece around its own centre.
    fn bounds(&self) -> Rect;
}

/// Text drawn on top of a piece.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label {
    pub text: String,
    pub style: TextStyle,
    /// Offset from the centre of the piece, before rotation.
    pub offset: Vec2,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Label {
        Label {
            text: text.into(),
            style: TextStyle::default(),
            offset: Vec2::ZERO,
        }
    }

    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }
}

/// Draw a shape built around the origin, then its label, at a placement.
fn draw_placed<R: RenderContext>(
    ctx: &mut R,
    centre: Point,
    rotation: f64,
    shape: impl Shape + Clone,
    style: &Style,
    label: Option<&Label>,
) -> Result<(), Error> {
    ctx.with_save(|ctx| {
        // page rotation is counter-clockwise with y pointing down
        ctx.transform(Affine::translate(centre.to_vec2()) * Affine::rotate(-rotation.to_radians()));
        ctx.draw_styled(shape, style);
        if let Some(label) = label {
            ctx.draw_text(&label.text, label.offset.to_point(), &label.style);
        }
        Ok(())
    })
}

/// A single hexagon.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexPiece {
    pub geometry: HexGeometry,
    pub style: Style,
    pub label: Option<Label>,
}

impl HexPiece {
    pub fn new(geometry: HexGeometry) -> HexPiece {
        HexPiece {
            geometry,
            style: Style::default(),
            label: None,
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }
}

impl Piece for HexPiece {
    fn draw<R: RenderContext>(&self, ctx: &mut R, centre: Point, rotation: f64) -> Result<(), Error> {
        let path = self.geometry.path(Point::ORIGIN);
        draw_placed(ctx, centre, rotation, path, &self.style, self.label.as_ref())
    }

    fn bounds(&self) -> Rect {
        Rect::from_center_size(
            Point::ORIGIN,
            Size::new(self.geometry.width(), self.geometry.height()),
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CirclePiece {
    pub radius: f64,
    pub style: Style,
    pub label: Option<Label>,
}

impl CirclePiece {
    pub fn new(radius: f64) -> Result<CirclePiece, Error> {
        Ok(CirclePiece {
            radius: ensure_positive("radius", radius)?,
            style: Style::default(),
            label: None,
        })
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }
}

impl Piece for CirclePiece {
    fn draw<R: RenderContext>(&self, ctx: &mut R, centre: Point, rotation: f64) -> Result<(), Error> {
        let circle = Circle::new(Point::ORIGIN, self.radius);
        draw_placed(ctx, centre, rotation, circle, &self.style, self.label.as_ref())
    }

    fn bounds(&self) -> Rect {
        Circle::new(Point::ORIGIN, self.radius).bounding_box()
    }
}

/// A rectangle, optionally with rounded corners.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectPiece {
    pub size: Size,
    pub rounding: f64,
    pub style: Style,
    pub label: Option<Label>,
}

impl RectPiece {
    pub fn new(size: Size) -> Result<RectPiece, Error> {
        ensure_positive("width", size.width)?;
        ensure_positive("height", size.height)?;
        Ok(RectPiece {
            size,
            rounding: 0.0,
            style: Style::default(),
            label: None,
        })
    }

    pub fn rounding(mut self, radius: f64) -> Self {
        self.rounding = radius.max(0.0);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }
}

impl Piece for RectPiece {
    fn draw<R: RenderContext>(&self, ctx: &mut R, centre: Point, rotation: f64) -> Result<(), Error> {
        let rect = self.bounds();
        let label = self.label.as_ref();
        if self.rounding > 0.0 {
            let shape = RoundedRect::from_rect(rect, self.rounding);
            draw_placed(ctx, centre, rotation, shape, &self.style, label)
        } else {
            draw_placed(ctx, centre, rotation, rect, &self.style, label)
        }
    }

    fn bounds(&self) -> Rect {
        Rect::from_center_size(Point::ORIGIN, self.size)
    }
}

/// A regular polygon with one vertex pointing up.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolygonPiece {
    vertices: Vec<Point>,
    pub style: Style,
    pub label: Option<Label>,
}

impl PolygonPiece {
    pub fn new(sides: usize, radius: f64) -> Result<PolygonPiece, Error> {
        Ok(PolygonPiece {
            vertices: polygon_vertices(sides, radius, Point::ORIGIN, 90.0)?,
            style: Style::default(),
            label: None,
        })
    }

    pub fn sides(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }
}

impl Piece for PolygonPiece {
    fn draw<R: RenderContext>(&self, ctx: &mut R, centre: Point, rotation: f64) -> Result<(), Error> {
        let path = polygon_path(&self.vertices);
        draw_placed(ctx, centre, rotation, path, &self.style, self.label.as_ref())
    }

    fn bounds(&self) -> Rect {
        polygon_path(&self.vertices).bounding_box()
    }
}

/// Any of the built-in pieces.
///
/// Layouts take a slice of a single piece type; this lets one layout mix
/// hexes, circles and the rest.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Component {
    Hex(HexPiece),
    Circle(CirclePiece),
    Rect(RectPiece),
    Polygon(PolygonPiece),
}

impl Piece for Component {
    fn draw<R: RenderContext>(&self, ctx: &mut R, centre: Point, rotation: f64) -> Result<(), Error> {
        match self {
            Component::Hex(p) => p.draw(ctx, centre, rotation),
            Component::Circle(p) => p.draw(ctx, centre, rotation),
            Component::Rect(p) => p.draw(ctx, centre, rotation),
            Component::Polygon(p) => p.draw(ctx, centre, rotation),
        }
    }

    fn bounds(&self) -> Rect {
        match self {
            Component::Hex(p) => p.bounds(),
            Component::Circle(p) => p.bounds(),
            Component::Rect(p) => p.bounds(),
            Component::Polygon(p) => p.bounds(),
        }
    }
}

impl From<HexPiece> for Component {
    fn from(p: HexPiece) -> Component {
        Component::Hex(p)
    }
}

impl From<CirclePiece> for Component {
    fn from(p: CirclePiece) -> Component {
        Component::Circle(p)
    }
}

impl From<RectPiece> for Component {
    fn from(p: RectPiece) -> Component {
        Component::Rect(p)
    }
}

impl From<PolygonPiece> for Component {
    fn from(p: PolygonPiece) -> Component {
        Component::Polygon(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::HexOrientation;
    use crate::{Color, NullRenderContext};

    #[test]
    fn pieces_restore_the_transform() {
        let mut rc = NullRenderContext::new();
        let hex = HexGeometry::from_side(HexOrientation::Pointy, 10.0).unwrap();
        let pieces: Vec<Component> = vec![
            HexPiece::new(hex).label(Label::new("0101")).into(),
            CirclePiece::new(5.0).unwrap().into(),
            RectPiece::new(Size::new(4.0, 6.0)).unwrap().rounding(1.0).into(),
            PolygonPiece::new(5, 8.0).unwrap().style(Style::filled(Color::TAN)).into(),
        ];
        for p in &pieces {
            p.draw(&mut rc, Point::new(20.0, 30.0), 45.0).unwrap();
            assert_eq!(rc.depth(), 0);
            assert_eq!(rc.current_transform(), Affine::IDENTITY);
        }
        // fill and stroke for three pieces, fill only for the polygon
        assert_eq!(rc.shapes, 7);
        assert_eq!(rc.texts, 1);
    }

    #[test]
    fn bounds_are_centred() {
        let hex = HexGeometry::from_side(HexOrientation::Flat, 10.0).unwrap();
        let b = HexPiece::new(hex).bounds();
        assert!((b.width() - 20.0).abs() < 1e-9);
        assert!((b.center().x).abs() < 1e-9);
        let r = RectPiece::new(Size::new(4.0, 6.0)).unwrap().bounds();
        assert_eq!(r, Rect::new(-2.0, -3.0, 2.0, 3.0));
        let tri = PolygonPiece::new(3, 10.0).unwrap();
        assert!((tri.bounds().y0 + 10.0).abs() < 1e-9);
        assert_eq!(tri.sides(), 3);
    }

    #[test]
    fn bad_sizes() {
        assert!(CirclePiece::new(0.0).is_err());
        assert!(RectPiece::new(Size::new(1.0, -1.0)).is_err());
        assert!(matches!(PolygonPiece::new(2, 1.0), Err(Error::TooFewSides(2))));
    }
}
