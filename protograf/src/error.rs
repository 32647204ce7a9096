//! The common error type for protograf operations.

use std::fmt;

use crate::layout::{Corner, Direction};

/// An error that can occur while computing or drawing components.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A polygon needs at least three sides.
    TooFewSides(usize),
    /// A length that must be strictly positive was not.
    NonPositive { what: &'static str, value: f64 },
    /// A length that may be zero was negative.
    Negative { what: &'static str, value: f64 },
    /// A grid, layout or deck with no rows, columns or cards.
    EmptyGrid,
    /// A traversal direction that does not lead away from its start corner.
    IncompatibleDirection { start: Corner, direction: Direction },
    /// A spacing or shape option that cannot be applied to this kind of input.
    InvalidSpacing(&'static str),
    /// Not even a single card fits on the page.
    PageTooSmall,
    /// A page list such as `1,3-5` that could not be understood.
    InvalidPageRange(String),
    /// A color string that could not be parsed.
    InvalidColor(String),
    /// A sample number that does not exist.
    InvalidSample(usize),
    /// Command line arguments that could not be understood.
    InvalidArgs(String),
    /// `restore` called without a matching `save`.
    StackUnbalance,
    /// An error reported by a rendering backend or by I/O.
    BackendError(Box<dyn std::error::Error>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::TooFewSides(n) => write!(f, "A polygon needs at least 3 sides (got {})", n),
            Error::NonPositive { what, value } => {
                write!(f, "The {} must be greater than zero (got {})", what, value)
            }
            Error::Negative { what, value } => {
                write!(f, "The {} must not be negative (got {})", what, value)
            }
            Error::EmptyGrid => write!(f, "Rows, columns and counts must be at least 1"),
            Error::IncompatibleDirection { start, direction } => write!(
                f,
                "Cannot start in the {:?} corner and move {:?}",
                start, direction
            ),
            Error::InvalidSpacing(msg) => write!(f, "Invalid spacing: {}", msg),
            Error::PageTooSmall => write!(f, "The page is too small to hold a single card"),
            Error::InvalidPageRange(s) => write!(f, "Invalid page range '{}'", s),
            Error::InvalidColor(s) => write!(f, "Invalid color '{}'", s),
            Error::InvalidSample(n) => write!(f, "No sample #{} exists", n),
            Error::InvalidArgs(s) => write!(f, "Invalid arguments: {}", s),
            Error::StackUnbalance => write!(f, "Stack unbalanced"),
            Error::BackendError(e) => {
                write!(f, "Backend error: ")?;
                e.fmt(f)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<Box<dyn std::error::Error>> for Error {
    fn from(e: Box<dyn std::error::Error>) -> Error {
        Error::BackendError(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::BackendError(Box::new(e))
    }
}

/// Check that a length is strictly positive (and not NaN).
pub(crate) fn ensure_positive(what: &'static str, value: f64) -> Result<f64, Error> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonPositive { what, value })
    }
}

/// Check that a length is zero or more (and not NaN).
pub(crate) fn ensure_non_negative(what: &'static str, value: f64) -> Result<f64, Error> {
    if value >= 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(Error::Negative { what, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_lengths() {
        assert_eq!(ensure_positive("side", 2.5).unwrap(), 2.5);
        assert!(ensure_positive("side", 0.0).is_err());
        assert!(ensure_positive("side", -1.0).is_err());
        assert!(ensure_positive("side", f64::NAN).is_err());
        assert_eq!(ensure_non_negative("gap", 0.0).unwrap(), 0.0);
        assert!(ensure_non_negative("gap", -0.5).is_err());
    }

    #[test]
    fn messages_name_the_problem() {
        let err = Error::NonPositive {
            what: "radius",
            value: -2.0,
        };
        assert_eq!(
            err.to_string(),
            "The radius must be greater than zero (got -2)"
        );
        let err = Error::IncompatibleDirection {
            start: Corner::NorthWest,
            direction: Direction::North,
        };
        assert_eq!(
            err.to_string(),
            "Cannot start in the NorthWest corner and move North"
        );
    }
}
