use std::fmt;

use crate::events::SweepPoint;

/// Errors reported while reading input or running a sweep.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A line of the text input could not be parsed. `line` is 1-based.
    Format { line: usize, reason: String },
    /// Both end points of a segment are equal.
    DegenerateSegment { point: SweepPoint },
    /// A coordinate was NaN or infinite.
    NonFinite,
    /// The segment was expected in the sweep status but is absent.
    ///
    /// This indicates a bug in the sweep, not bad input.
    NotFound { segment: usize },
    /// The segment sits among segments meeting at `point` in the sweep
    /// status, but misses the point.
    Misordered { segment: usize, point: SweepPoint },
}

impl Error {
    pub(crate) fn format<S: Into<String>>(line: usize, reason: S) -> Self {
        Error::Format {
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Format { line, reason } => write!(f, "line {}: {}", line, reason),
            Error::DegenerateSegment { point } => {
                write!(f, "zero-length segment at {}", point)
            }
            Error::NonFinite => write!(f, "segment has a non-finite coordinate"),
            Error::NotFound { segment } => {
                write!(f, "segment {} is not in the sweep status", segment)
            }
            Error::Misordered { segment, point } => write!(
                f,
                "segment {} is ordered among the segments meeting at {}",
                segment, point
            ),
        }
    }
}

impl std::error::Error for Error {}
