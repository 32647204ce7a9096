//! A render context that does nothing.

use kurbo::{Affine, Point, Shape};

use crate::{Color, Error, RenderContext, StrokeStyle, TextStyle};

/// A render context that doesn't render.
///
/// It keeps the transform stack honest and counts what would have been
/// drawn, which makes it handy for tests and for measuring a layout.
#[derive(Debug, Default)]
pub struct NullRenderContext {
    transform: Affine,
    stack: Vec<Affine>,
    /// Number of fill and stroke calls.
    pub shapes: usize,
    /// Number of text runs.
    pub texts: usize,
}

impl NullRenderContext {
    pub fn new() -> NullRenderContext {
        NullRenderContext::default()
    }

    /// How many states are currently saved.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl RenderContext for NullRenderContext {
    fn status(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn clear(&mut self, _color: Color) {}

    fn fill(&mut self, _shape: impl Shape, _color: &Color) {
        self.shapes += 1;
    }

    fn stroke(&mut self, _shape: impl Shape, _color: &Color, _width: f64, _style: &StrokeStyle) {
        self.shapes += 1;
    }

    fn draw_text(&mut self, _text: &str, _pos: impl Into<Point>, _style: &TextStyle) {
        self.texts += 1;
    }

    fn save(&mut self) -> Result<(), Error> {
        self.stack.push(self.transform);
        Ok(())
    }

    fn restore(&mut self) -> Result<(), Error> {
        self.transform = self.stack.pop().ok_or(Error::StackUnbalance)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Error> {
        if self.stack.is_empty() {
            Ok(())
        } else {
            Err(Error::StackUnbalance)
        }
    }

    fn transform(&mut self, transform: Affine) {
        self.transform *= transform;
    }

    fn current_transform(&self) -> Affine {
        self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Circle, Rect, Vec2};

    #[test]
    fn save_and_restore_transforms() {
        let mut rc = NullRenderContext::new();
        rc.save().unwrap();
        rc.transform(Affine::translate(Vec2::new(10.0, 0.0)));
        assert_eq!(rc.depth(), 1);
        assert!(rc.finish().is_err());
        rc.restore().unwrap();
        assert_eq!(rc.current_transform(), Affine::IDENTITY);
        assert!(matches!(rc.restore(), Err(Error::StackUnbalance)));
        rc.finish().unwrap();
    }

    #[test]
    fn counts_drawing() {
        let mut rc = NullRenderContext::new();
        let style = crate::Style::default();
        rc.draw_styled(Rect::new(0.0, 0.0, 1.0, 1.0), &style);
        rc.draw_styled(Circle::new(Point::ORIGIN, 1.0), &crate::Style::filled(Color::RED));
        rc.draw_text("A", Point::ORIGIN, &TextStyle::default());
        assert_eq!(rc.shapes, 3);
        assert_eq!(rc.texts, 1);
    }

    #[test]
    fn with_save_restores_on_error() {
        let mut rc = NullRenderContext::new();
        let result = rc.with_save(|rc| {
            rc.transform(Affine::scale(2.0));
            Err(Error::EmptyGrid)
        });
        assert!(result.is_err());
        assert_eq!(rc.depth(), 0);
        assert_eq!(rc.current_transform(), Affine::IDENTITY);
    }
}
