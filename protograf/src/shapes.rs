//! Options for drawing paths.

use crate::Color;

/// Options for drawing stroked lines.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrokeStyle {
    pub line_join: LineJoin,
    pub line_cap: LineCap,
    pub dash_pattern: Vec<f64>,
    pub dash_offset: f64,
}

/// Options for angled joins in strokes.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Options for the cap of stroked lines.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeStyle {
    pub fn new() -> StrokeStyle {
        StrokeStyle::default()
    }

    pub fn line_join(mut self, line_join: LineJoin) -> Self {
        self.line_join = line_join;
        self
    }

    pub fn line_cap(mut self, line_cap: LineCap) -> Self {
        self.line_cap = line_cap;
        self
    }

    pub fn dash(mut self, pattern: Vec<f64>, offset: f64) -> Self {
        self.dash_pattern = pattern;
        self.dash_offset = offset;
        self
    }

    pub fn set_line_join(&mut self, line_join: LineJoin) {
        self.line_join = line_join;
    }

    pub fn set_line_cap(&mut self, line_cap: LineCap) {
        self.line_cap = line_cap;
    }

    pub fn set_dash(&mut self, pattern: Vec<f64>, offset: f64) {
        self.dash_pattern = pattern;
        self.dash_offset = offset;
    }
}

/// How a component outline is filled and stroked.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub stroke_style: StrokeStyle,
}

impl Default for Style {
    /// A white shape with a thin black outline.
    fn default() -> Self {
        Style {
            fill: Some(Color::WHITE),
            stroke: Some(Color::BLACK),
            stroke_width: 1.0,
            stroke_style: StrokeStyle::new(),
        }
    }
}

impl Style {
    /// An outline only, with no fill.
    pub fn outline(color: Color, width: f64) -> Style {
        Style {
            fill: None,
            stroke: Some(color),
            stroke_width: width,
            stroke_style: StrokeStyle::new(),
        }
    }

    /// A fill only, with no outline.
    pub fn filled(color: Color) -> Style {
        Style {
            fill: Some(color),
            stroke: None,
            ..Style::default()
        }
    }

    pub fn fill(mut self, color: impl Into<Option<Color>>) -> Self {
        self.fill = color.into();
        self
    }

    pub fn stroke(mut self, color: impl Into<Option<Color>>, width: f64) -> Self {
        self.stroke = color.into();
        self.stroke_width = width;
        self
    }

    pub fn stroke_style(mut self, style: StrokeStyle) -> Self {
        self.stroke_style = style;
        self
    }
}
