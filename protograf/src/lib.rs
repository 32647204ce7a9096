//! Geometry and layout for board game components.
//!
//! Protograf works out where things go on a printed page: hexagonal,
//! square and triangular grids, rectangular and triangular sequences of
//! locations, tracks around the edge of a shape, and decks of cards
//! spread over several pages. Drawing goes through the [`RenderContext`]
//! trait, which a backend such as `protograf-svg` implements.
//!
//! All lengths are in points, with y pointing down the page. Angles are
//! in degrees, measured counter-clockwise on the page from east.

pub use kurbo;

/// Geometry helpers shared by grids, tracks and pieces.
pub mod geom;
/// utilities shared by backends
pub mod util;

mod color;
mod deck;
mod error;
mod grid;
mod hex;
mod layout;
mod null_renderer;
mod piece;
mod render_context;
mod shapes;
mod track;
mod units;

#[cfg(feature = "samples")]
pub mod samples;

pub use crate::color::*;
pub use crate::deck::*;
pub use crate::error::*;
pub use crate::grid::*;
pub use crate::hex::*;
pub use crate::layout::*;
pub use crate::null_renderer::*;
pub use crate::piece::*;
pub use crate::render_context::*;
pub use crate::shapes::*;
pub use crate::track::*;
pub use crate::units::*;
