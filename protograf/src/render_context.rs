//! The drawing surface that pieces render onto.

use kurbo::{Affine, Point, Shape};

use crate::{Color, Error, StrokeStyle};

/// Where a line of text sits relative to its position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextAnchor {
    Start,
    /// Centred horizontally and vertically on the position.
    #[default]
    Middle,
    End,
}

/// Simple text attributes.
///
/// Fonts are left to the backend.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStyle {
    pub size: f64,
    pub color: Color,
    pub anchor: TextAnchor,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            size: crate::util::DEFAULT_TEXT_SIZE,
            color: Color::BLACK,
            anchor: TextAnchor::Middle,
        }
    }
}

impl TextStyle {
    pub fn new(size: f64, color: Color) -> TextStyle {
        TextStyle {
            size,
            color,
            anchor: TextAnchor::Middle,
        }
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }
}

/// A page that shapes and text can be drawn on.
///
/// Coordinates are in points with y pointing down the page. The current
/// transform applies to everything drawn.
pub trait RenderContext {
    /// Report an internal error.
    ///
    /// Drawing methods don't return errors; a backend records the first
    /// failure and reports it here.
    fn status(&mut self) -> Result<(), Error>;

    /// Fill the whole page with a color, ignoring the current transform.
    fn clear(&mut self, color: Color);

    /// Fill a shape.
    fn fill(&mut self, shape: impl Shape, color: &Color);

    /// Stroke a shape.
    fn stroke(&mut self, shape: impl Shape, color: &Color, width: f64, style: &StrokeStyle);

    /// Draw a single line of text at a position.
    fn draw_text(&mut self, text: &str, pos: impl Into<Point>, style: &TextStyle);

    /// Save the context state.
    ///
    /// Pushes the current transform onto a stack.
    fn save(&mut self) -> Result<(), Error>;

    /// Restore the context state.
    ///
    /// Pops the state from the stack; an unmatched restore is an error.
    fn restore(&mut self) -> Result<(), Error>;

    /// Finish any pending work on the page.
    fn finish(&mut self) -> Result<(), Error>;

    /// Apply a transform, after the current one.
    fn transform(&mut self, transform: Affine);

    /// The current transform.
    fn current_transform(&self) -> Affine;

    /// Draw a shape with a [`Style`](crate::Style), fill first.
    fn draw_styled(&mut self, shape: impl Shape + Clone, style: &crate::Style) {
        if let Some(fill) = &style.fill {
            self.fill(shape.clone(), fill);
        }
        if let Some(stroke) = &style.stroke {
            if style.stroke_width > 0.0 {
                self.stroke(shape, stroke, style.stroke_width, &style.stroke_style);
            }
        }
    }

    /// Run `f` between a save and a restore.
    fn with_save(&mut self, f: impl FnOnce(&mut Self) -> Result<(), Error>) -> Result<(), Error>
    where
        Self: Sized,
    {
        self.save()?;
        let result = f(self);
        self.restore()?;
        result
    }
}
