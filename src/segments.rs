use std::{cmp::Ordering, convert::TryFrom};

use geo::{Coordinate, Line};

use crate::{events::SweepPoint, Error};

/// Rounding applied to line-equation residuals.
///
/// A residual is rounded to a fixed number of decimal digits before
/// its sign is inspected, so that points computed by intersecting two
/// lines are accepted as lying on both. The same tolerance is used by
/// every on-line test and by the status ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    decimals: u32,
    scale: f64,
}

impl Tolerance {
    pub const DEFAULT_DECIMALS: u32 = 5;
    /// Finest supported rounding; `f64` carries no more significant
    /// decimal digits.
    pub const MAX_DECIMALS: u32 = 15;

    /// Round to `decimals` digits, capped at [`Self::MAX_DECIMALS`].
    pub fn new(decimals: u32) -> Self {
        let decimals = decimals.min(Self::MAX_DECIMALS);
        Tolerance {
            decimals,
            scale: 10f64.powi(decimals as i32),
        }
    }

    #[inline]
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Round `value` to the configured number of decimals.
    #[inline]
    pub fn round(&self, value: f64) -> f64 {
        (value * self.scale).round() / self.scale
    }

    #[inline]
    pub fn is_zero(&self, value: f64) -> bool {
        self.round(value) == 0.
    }

    /// Sign of `value` after rounding.
    #[inline]
    pub fn signum(&self, value: f64) -> Ordering {
        let rounded = self.round(value);
        if rounded > 0. {
            Ordering::Greater
        } else if rounded < 0. {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::new(Self::DEFAULT_DECIMALS)
    }
}

/// A line segment with canonically ordered end points.
///
/// The `start` has the smaller `x`; for vertical segments it is the
/// upper end point. This is the order in which the sweep visits them.
/// The implicit equation `a * x + b * y + c = 0` of the supporting line
/// is computed once; `b` is never negative and is zero exactly for
/// vertical segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: SweepPoint,
    end: SweepPoint,
    a: f64,
    b: f64,
    c: f64,
    key: SweepPoint,
}

impl Segment {
    /// Create a segment between two points, in any order.
    ///
    /// Fails if a coordinate isn't finite, or if the points are equal.
    pub fn new<P: Into<Coordinate<f64>>>(p: P, q: P) -> Result<Self, Error> {
        let (p, q) = (p.into(), q.into());
        if ![p.x, p.y, q.x, q.y].iter().all(|v| v.is_finite()) {
            return Err(Error::NonFinite);
        }
        let (p, q) = (SweepPoint::from(p), SweepPoint::from(q));
        let (start, end) = match p.cmp(&q) {
            Ordering::Less => (p, q),
            Ordering::Greater => (q, p),
            Ordering::Equal => return Err(Error::DegenerateSegment { point: p }),
        };

        Ok(Segment {
            start,
            end,
            a: start.y() - end.y(),
            b: end.x() - start.x(),
            c: start.x() * end.y() - end.x() * start.y(),
            key: start,
        })
    }

    #[inline]
    pub fn start(&self) -> SweepPoint {
        self.start
    }

    #[inline]
    pub fn end(&self) -> SweepPoint {
        self.end
    }

    /// Coefficients `(a, b, c)` of the supporting line.
    #[inline]
    pub fn coefficients(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.b == 0.
    }

    /// The point used to order this segment in the sweep status.
    ///
    /// Starts as the `start` point and moves to each crossing processed
    /// on the segment. Comparisons through the key are only meaningful
    /// at or after its `x`.
    #[inline]
    pub fn key(&self) -> SweepPoint {
        self.key
    }

    /// `key` must lie on the segment, up to the tolerance.
    pub(crate) fn set_key(&mut self, key: SweepPoint) {
        self.key = key;
    }

    /// Signed residual of `pt` in the line equation.
    ///
    /// Positive above the line (to the right, for vertical segments).
    #[inline]
    pub fn evaluate(&self, pt: SweepPoint) -> f64 {
        self.a * pt.x() + self.b * pt.y() + self.c
    }

    /// Negated slope `-a / b` of the line.
    ///
    /// Vertical segments run downwards from `start`, and get the limit
    /// of `-a / b` as `b` shrinks to zero: `-inf`.
    #[inline]
    pub fn slope(&self) -> f64 {
        if self.is_vertical() {
            f64::NEG_INFINITY
        } else {
            -self.a / self.b
        }
    }

    /// Checks whether `pt` lies on this segment, up to the tolerance.
    ///
    /// The range check is on `x`, and additionally on `y` for vertical
    /// segments where the `x` range is a single value.
    pub fn contains(&self, pt: SweepPoint, tol: Tolerance) -> bool {
        if !tol.is_zero(self.evaluate(pt)) {
            return false;
        }
        if self.is_vertical() {
            self.end.y() <= pt.y() && pt.y() <= self.start.y()
        } else {
            self.start.x() <= pt.x() && pt.x() <= self.end.x()
        }
    }

    /// Intersect with `other` and return the common point, if any.
    ///
    /// Parallel and collinear segments never intersect. A computed
    /// point within tolerance of an end point is replaced by that end
    /// point.
    pub fn intersect(&self, other: &Segment, tol: Tolerance) -> Option<SweepPoint> {
        let det = self.a * other.b - other.a * self.b;
        if det == 0. {
            return None;
        }
        let x = if self.is_vertical() {
            self.start.x()
        } else if other.is_vertical() {
            other.start.x()
        } else {
            (self.b * other.c - other.b * self.c) / det
        };
        let y = (other.a * self.c - self.a * other.c) / det;
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        let computed = SweepPoint::new(x, y);
        let pt = [self.start, self.end, other.start, other.end]
            .iter()
            .copied()
            .find(|e| tol.is_zero(e.x() - x) && tol.is_zero(e.y() - y))
            .unwrap_or(computed);

        if self.contains(pt, tol) && other.contains(pt, tol) {
            Some(pt)
        } else {
            None
        }
    }

    /// Ordering predicate of the sweep status: is `self` above `other`?
    ///
    /// Evaluates `other`'s line at `self`'s key. If the key lies on the
    /// line, the segment with the larger negated slope comes first: that
    /// is the one above `other` to the right of the key.
    pub fn is_before(&self, other: &Segment, tol: Tolerance) -> bool {
        match tol.signum(other.evaluate(self.key)) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => self.slope() > other.slope(),
        }
    }
}

impl TryFrom<Line<f64>> for Segment {
    type Error = Error;

    fn try_from(l: Line<f64>) -> Result<Self, Self::Error> {
        Segment::new(l.start, l.end)
    }
}

impl From<Segment> for Line<f64> {
    fn from(s: Segment) -> Self {
        Line::new(s.start.coord(), s.end.coord())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn seg(p: (f64, f64), q: (f64, f64)) -> Segment {
        Segment::new(p, q).unwrap()
    }

    #[test]
    fn test_canonical_order() {
        let s = seg((4., 0.), (0., 4.));
        assert_eq!(s.start(), SweepPoint::new(0., 4.));
        assert_eq!(s.end(), SweepPoint::new(4., 0.));
        assert_eq!(s.key(), s.start());

        // Vertical segments start at the top.
        let v = seg((2., 0.), (2., 4.));
        assert_eq!(v.start(), SweepPoint::new(2., 4.));
        assert!(v.is_vertical());
        assert_eq!(v.slope(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_coefficients() {
        let s = seg((0., 4.), (4., 0.));
        assert_eq!(s.coefficients(), (4., 4., -16.));
        assert!(s.evaluate(SweepPoint::new(2., 2.)) == 0.);
        assert!(s.evaluate(SweepPoint::new(2., 3.)) > 0.);
        assert_relative_eq!(s.slope(), -1.);
    }

    #[test]
    fn test_rejects_degenerate() {
        assert_eq!(
            Segment::new((1., 1.), (1., 1.)),
            Err(Error::DegenerateSegment {
                point: SweepPoint::new(1., 1.)
            })
        );
        assert_eq!(
            Segment::new((1., f64::NAN), (1., 1.)),
            Err(Error::NonFinite)
        );
        let line = Line::from([(0., 0.), (0., 0.)]);
        assert!(Segment::try_from(line).is_err());
    }

    #[test]
    fn test_tolerance() {
        let tol = Tolerance::default();
        assert_eq!(tol.decimals(), 5);
        assert!(tol.is_zero(4e-6));
        assert!(tol.is_zero(-4e-6));
        assert!(!tol.is_zero(6e-6));
        assert_eq!(tol.signum(-1e-3), Ordering::Less);

        let coarse = Tolerance::new(1);
        assert!(coarse.is_zero(0.04));

        let fine = Tolerance::new(u32::MAX);
        assert_eq!(fine.decimals(), Tolerance::MAX_DECIMALS);
        assert!(fine.is_zero(0.));
        assert!(!fine.is_zero(1e-9));
        assert_eq!(Tolerance::new(400), fine);
    }

    #[test]
    fn test_intersect() {
        let tol = Tolerance::default();
        let s1 = seg((0., 0.), (4., 4.));
        let s2 = seg((0., 4.), (4., 0.));
        let pt = s1.intersect(&s2, tol).unwrap();
        assert_relative_eq!(pt.x(), 2.);
        assert_relative_eq!(pt.y(), 2.);
        assert_eq!(s2.intersect(&s1, tol), Some(pt));

        // Parallel
        let s3 = seg((0., 1.), (4., 5.));
        assert_eq!(s1.intersect(&s3, tol), None);

        // Collinear overlap is not reported.
        let s4 = seg((2., 2.), (6., 6.));
        assert_eq!(s1.intersect(&s4, tol), None);

        // Lines cross outside of the segments.
        let s5 = seg((5., 0.), (6., -1.));
        assert_eq!(s1.intersect(&s5, tol), None);
    }

    #[test]
    fn test_intersect_shared_end_point() {
        let tol = Tolerance::default();
        let s1 = seg((0., 0.), (1. / 3., 1.));
        let s2 = seg((1. / 3., 1.), (3., 0.));
        assert_eq!(s1.intersect(&s2, tol), Some(SweepPoint::new(1. / 3., 1.)));
    }

    #[test]
    fn test_intersect_vertical() {
        let tol = Tolerance::default();
        let v = seg((2., 0.), (2., 4.));
        let h = seg((0., 1.), (4., 3.));
        let pt = v.intersect(&h, tol).unwrap();
        assert_relative_eq!(pt.x(), 2.);
        assert_relative_eq!(pt.y(), 2.);

        let v2 = seg((3., 0.), (3., 4.));
        assert_eq!(v.intersect(&v2, tol), None);

        let miss = seg((0., 5.), (4., 6.));
        assert_eq!(v.intersect(&miss, tol), None);
    }

    #[test]
    fn test_is_before() {
        let tol = Tolerance::default();
        let top = seg((0., 4.), (4., 4.));
        let bottom = seg((0., 0.), (4., 0.));
        assert!(top.is_before(&bottom, tol));
        assert!(!bottom.is_before(&top, tol));

        // Starting at a common point: the steeper one is above.
        let up = seg((0., 0.), (4., 4.));
        let down = seg((0., 0.), (4., -4.));
        assert!(up.is_before(&down, tol));
        assert!(!down.is_before(&up, tol));

        // A vertical segment heads down from its start.
        let v = seg((0., 0.), (0., -3.));
        assert!(up.is_before(&v, tol));
        assert!(!v.is_before(&up, tol));
        assert!(down.is_before(&v, tol));

        // Collinear segments tie and neither comes first.
        let flat = seg((2., 0.), (6., 0.));
        assert!(!flat.is_before(&bottom, tol));
    }
}
