//! Reference implementation checking every pair of segments.
use itertools::Itertools;

use crate::{events::SweepPoint, segments::Segment, Tolerance};

/// Intersect every unordered pair of `segments`, in input order.
///
/// Runs in `O(n^2)` time. Uses the same intersection test as the
/// sweep, and so finds the same points (up to rounding in the order of
/// the operands).
pub fn intersections(segments: &[Segment], tol: Tolerance) -> Vec<SweepPoint> {
    segments
        .iter()
        .tuple_combinations()
        .filter_map(|(s1, s2)| s1.intersect(s2, tol))
        .collect()
}
