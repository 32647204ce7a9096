//! SVG output support for protograf
//!
//! Each page is a separate document, sized in points so that it prints at
//! the intended scale.

#![deny(clippy::trivially_copy_pass_by_ref)]

use std::{fmt, io, mem};

use protograf::kurbo::{Affine, Point, Shape, Size};
use protograf::util::fmt_number;
use protograf::{Color, Error, LineCap, LineJoin, StrokeStyle, TextAnchor, TextStyle};
use svg::node::Node;

type Result<T> = std::result::Result<T, Error>;

/// `protograf::RenderContext` for generating SVG images
pub struct RenderContext {
    stack: Vec<State>,
    state: State,
    doc: svg::Document,
}

impl RenderContext {
    /// Construct an empty `RenderContext` for a page of the given size.
    pub fn new(size: Size) -> Self {
        let doc = svg::Document::new()
            .set("viewBox", (0, 0, size.width, size.height))
            .set("width", format!("{}pt", size.width))
            .set("height", format!("{}pt", size.height));
        Self {
            stack: Vec::new(),
            state: State::default(),
            doc,
        }
    }

    /// Write graphics rendered so far to an `std::io::Write` impl, such as `std::fs::File`
    ///
    /// Additional rendering can be done afterwards.
    pub fn write(&self, writer: impl io::Write) -> io::Result<()> {
        svg::write(writer, &self.doc)
    }

    /// Returns an object that can write the svg somewhere.
    pub fn display(&self) -> &impl fmt::Display {
        &self.doc
    }
}

impl protograf::RenderContext for RenderContext {
    fn status(&mut self) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self, color: Color) {
        let mut rect = svg::node::element::Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", fmt_color(&color));
        if let Some(opacity) = fmt_opacity(&color) {
            rect.assign("fill-opacity", opacity);
        }
        self.doc.append(rect);
    }

    fn fill(&mut self, shape: impl Shape, color: &Color) {
        add_shape(
            &mut self.doc,
            shape,
            &Attrs {
                xf: self.state.xf,
                fill: Some(*color),
                ..Attrs::default()
            },
        );
    }

    fn stroke(&mut self, shape: impl Shape, color: &Color, width: f64, style: &StrokeStyle) {
        add_shape(
            &mut self.doc,
            shape,
            &Attrs {
                xf: self.state.xf,
                stroke: Some((*color, width, style)),
                ..Attrs::default()
            },
        );
    }

    fn draw_text(&mut self, text: &str, pos: impl Into<Point>, style: &TextStyle) {
        let pos = pos.into();
        let anchor = match style.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let mut node = svg::node::element::Text::new(text)
            .set("x", pos.x)
            .set("y", pos.y)
            .set("transform", xf_val(&self.state.xf))
            .set("font-size", style.size)
            .set("text-anchor", anchor)
            .set("fill", fmt_color(&style.color));
        if style.anchor == TextAnchor::Middle {
            node.assign("dominant-baseline", "central");
        }
        if let Some(opacity) = fmt_opacity(&style.color) {
            node.assign("fill-opacity", opacity);
        }
        self.doc.append(node);
    }

    fn save(&mut self) -> Result<()> {
        let new = self.state.clone();
        self.stack.push(mem::replace(&mut self.state, new));
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        self.state = self.stack.pop().ok_or(Error::StackUnbalance)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if !self.stack.is_empty() {
            log::warn!("finished with {} unrestored states", self.stack.len());
            return Err(Error::StackUnbalance);
        }
        Ok(())
    }

    fn transform(&mut self, transform: Affine) {
        self.state.xf *= transform;
    }

    fn current_transform(&self) -> Affine {
        self.state.xf
    }
}

/// Draw one page of a sample and write it to `dir`.
#[cfg(feature = "samples")]
pub fn render_sample(
    number: usize,
    page: usize,
    dir: &std::path::Path,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    use protograf::RenderContext as _;

    let sample = protograf::samples::get(number)?;
    let mut ctx = RenderContext::new(sample.size());
    sample.draw(&mut ctx, page)?;
    ctx.finish()?;
    let path = dir.join(protograf::samples::file_name("protograf-svg", number, page, "svg"));
    let file = std::fs::File::create(&path)?;
    ctx.write(io::BufWriter::new(file))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

#[derive(Default)]
struct Attrs<'a> {
    xf: Affine,
    fill: Option<Color>,
    stroke: Option<(Color, f64, &'a StrokeStyle)>,
}

impl Attrs<'_> {
    // allow clippy warning for `width != 1.0` in if statement
    #[allow(clippy::float_cmp)]
    fn apply_to(&self, node: &mut impl Node) {
        if self.xf != Affine::IDENTITY {
            node.assign("transform", xf_val(&self.xf));
        }
        if let Some(ref color) = self.fill {
            node.assign("fill", fmt_color(color));
            if let Some(opacity) = fmt_opacity(color) {
                node.assign("fill-opacity", opacity);
            }
        } else {
            node.assign("fill", "none");
        }
        if let Some((ref color, width, style)) = self.stroke {
            node.assign("stroke", fmt_color(color));
            if let Some(opacity) = fmt_opacity(color) {
                node.assign("stroke-opacity", opacity);
            }
            if width != 1.0 {
                node.assign("stroke-width", width);
            }
            match style.line_join {
                LineJoin::Miter => (),
                LineJoin::Round => {
                    node.assign("stroke-linejoin", "round");
                }
                LineJoin::Bevel => {
                    node.assign("stroke-linejoin", "bevel");
                }
            }
            match style.line_cap {
                LineCap::Round => {
                    node.assign("stroke-linecap", "round");
                }
                LineCap::Square => {
                    node.assign("stroke-linecap", "square");
                }
                LineCap::Butt => (),
            }
            if !style.dash_pattern.is_empty() {
                node.assign("stroke-dasharray", style.dash_pattern.to_vec());
            }
            if style.dash_offset != 0.0 {
                node.assign("stroke-dashoffset", style.dash_offset);
            }
        }
    }
}

fn xf_val(xf: &Affine) -> svg::node::Value {
    let xf = xf.as_coeffs().map(fmt_number);
    format!(
        "matrix({} {} {} {} {} {})",
        xf[0], xf[1], xf[2], xf[3], xf[4], xf[5]
    )
    .into()
}

fn add_shape(node: &mut impl Node, shape: impl Shape, attrs: &Attrs) {
    if let Some(circle) = shape.as_circle() {
        let mut x = svg::node::element::Circle::new()
            .set("cx", circle.center.x)
            .set("cy", circle.center.y)
            .set("r", circle.radius);
        attrs.apply_to(&mut x);
        node.append(x);
    } else if let Some((round_rect, radius)) = shape
        .as_rounded_rect()
        .and_then(|r| r.radii().as_single_radius().map(|radius| (r, radius)))
    {
        let mut x = svg::node::element::Rectangle::new()
            .set("x", round_rect.origin().x)
            .set("y", round_rect.origin().y)
            .set("width", round_rect.width())
            .set("height", round_rect.height())
            .set("rx", radius)
            .set("ry", radius);
        attrs.apply_to(&mut x);
        node.append(x);
    } else if let Some(rect) = shape.as_rect() {
        let mut x = svg::node::element::Rectangle::new()
            .set("x", rect.origin().x)
            .set("y", rect.origin().y)
            .set("width", rect.width())
            .set("height", rect.height());
        attrs.apply_to(&mut x);
        node.append(x);
    } else if let Some(line) = shape.as_line() {
        let mut x = svg::node::element::Line::new()
            .set("x1", line.p0.x)
            .set("y1", line.p0.y)
            .set("x2", line.p1.x)
            .set("y2", line.p1.y);
        attrs.apply_to(&mut x);
        node.append(x);
    } else {
        let mut path = svg::node::element::Path::new().set("d", shape.into_path(1e-3).to_svg());
        attrs.apply_to(&mut path);
        node.append(path);
    }
}

#[derive(Debug, Clone, Default)]
struct State {
    xf: Affine,
}

// RGB in hex representation
fn fmt_color(color: &Color) -> String {
    format!("#{:06x}", color.as_rgba32() >> 8)
}

// Opacity as value from [0, 1], left out when opaque
fn fmt_opacity(color: &Color) -> Option<String> {
    let alpha = color.alpha();
    (alpha < 1.0).then(|| format!("{}", alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use protograf::kurbo::{Circle, Line, Rect, RoundedRect, Vec2};
    use protograf::RenderContext as _;

    fn render(f: impl FnOnce(&mut RenderContext)) -> String {
        let mut rc = RenderContext::new(Size::new(100., 50.));
        f(&mut rc);
        rc.display().to_string()
    }

    #[test]
    fn colors() {
        assert_eq!(fmt_color(&Color::rgb8(0x12, 0x34, 0x56)), "#123456");
        assert_eq!(fmt_opacity(&Color::BLACK), None);
        assert_eq!(fmt_opacity(&Color::rgba8(0, 0, 0, 0)).as_deref(), Some("0"));
    }

    #[test]
    fn shapes_use_native_elements() {
        let out = render(|rc| {
            rc.fill(Circle::new((5., 5.), 2.), &Color::RED);
            rc.fill(Rect::new(0., 0., 4., 4.), &Color::BLUE);
            rc.fill(RoundedRect::new(0., 0., 4., 4., 1.), &Color::BLUE);
            rc.stroke(Line::new((0., 0.), (4., 4.)), &Color::BLACK, 2., &StrokeStyle::new());
        });
        assert!(out.contains("<circle"));
        assert!(out.contains("rx=\"1\""));
        assert!(out.contains("<line"));
        assert!(out.contains("stroke-width=\"2\""));
        assert!(out.contains("width=\"100pt\""));
    }

    #[test]
    fn transforms_follow_the_stack() {
        let mut rc = RenderContext::new(Size::new(10., 10.));
        rc.save().unwrap();
        rc.transform(Affine::translate(Vec2::new(3., 4.)));
        rc.fill(Rect::new(0., 0., 1., 1.), &Color::BLACK);
        assert!(rc.finish().is_err());
        rc.restore().unwrap();
        rc.fill(Rect::new(0., 0., 1., 1.), &Color::BLACK);
        rc.finish().unwrap();
        assert!(matches!(rc.restore(), Err(Error::StackUnbalance)));
        let out = rc.display().to_string();
        assert_eq!(out.matches("matrix(1 0 0 1 3 4)").count(), 1);
    }

    #[test]
    fn dashed_strokes() {
        let style = StrokeStyle::new()
            .dash(vec![3., 1.], 0.5)
            .line_cap(LineCap::Round);
        let out = render(|rc| {
            rc.stroke(Rect::new(0., 0., 1., 1.), &Color::BLACK, 1., &style);
        });
        assert!(out.contains("stroke-dasharray=\"3 1\""));
        assert!(out.contains("stroke-dashoffset=\"0.5\""));
        assert!(out.contains("stroke-linecap=\"round\""));
    }
}
