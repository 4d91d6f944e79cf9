//! Finds all intersection points of a collection of line segments.
//!
//! This is an implementation of the [Bentley-Ottman] algorithm: a
//! vertical line sweeps the plane from left to right over a timeline of
//! events (segment end points and crossings), and only segments that
//! are neighbours along the line are tested for intersection. This
//! finds `k` intersections among `n` segments with `O((n + k) log(n))`
//! timeline operations, instead of the `n^2` tests of checking every
//! pair (see [`brute_force`]).
//!
//! Arithmetic is plain `f64`. Whether a point lies on a line is decided
//! by rounding the line equation to a fixed number of decimals (see
//! [`Tolerance`]). Collinear overlapping segments are not reported as
//! intersecting, and zero-length segments are rejected.
//!
//! ## Usage
//!
//! Build [`Segment`]s and run a [`Sweep`] over them. The output lists
//! the intersection points and the events processed, in order.
//!
//! ```rust
//! use plane_sweep::{Segment, Sweep};
//! let input = vec![
//!     Segment::new((1., 0.), (0., 1.)).unwrap(),
//!     Segment::new((0., 0.5), (1., 0.5)).unwrap(),
//!     Segment::new((0., 0.), (1., 1.)).unwrap(),
//! ];
//! let output = Sweep::new(input).run().unwrap();
//! // All pairs intersect
//! assert_eq!(output.points.len(), 3);
//! ```
//!
//! Or use [`intersections`] to go straight from [`geo::Line`]s to points.
//!
//! [Bentley-Ottman]: //en.wikipedia.org/wiki/Bentley%E2%80%93Ottmann_algorithm
mod error;
pub use error::Error;

mod events;
pub use events::{Event, EventId, EventKind, SweepPoint};

mod segments;
pub use segments::{Segment, Tolerance};

mod timeline;
pub use timeline::Timeline;

mod active;
pub use active::ActiveSegments;

mod sweep;
pub use sweep::{Sweep, SweepOutput};

pub mod brute_force;
pub mod io;

/// Compute the intersection points of `lines` with the default
/// tolerance.
pub fn intersections<I: IntoIterator<Item = geo::Line<f64>>>(
    lines: I,
) -> Result<Vec<SweepPoint>, Error> {
    Ok(Sweep::from_lines(lines)?.run()?.points)
}

#[cfg(test)]
#[path = "../benches/utils/random.rs"]
pub mod random;

#[cfg(test)]
mod tests {
    use geo::Line;

    use super::*;

    #[test]
    fn test_intersections() {
        let points = intersections(vec![
            Line::from([(0., 0.), (4., 4.)]),
            Line::from([(0., 4.), (4., 0.)]),
        ])
        .unwrap();
        assert_eq!(points, vec![SweepPoint::new(2., 2.)]);

        assert!(intersections(Vec::<Line<f64>>::new()).unwrap().is_empty());
    }
}
