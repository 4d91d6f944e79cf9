use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use geo::Coordinate;

/// Wraps a [`Coordinate`] to support ordering along the sweep.
///
/// The ordering is by `x` ascending and then by `y` descending: at a
/// fixed `x` the sweep visits points from top to bottom. Implements
/// `Ord`, `Eq` and `Hash` even though `Coordinate` doesn't implement
/// these, which is necessary to use points as keys in ordered and
/// hashed collections.
///
/// Equality is exact. Construction asserts that both components are
/// finite and normalizes `-0.0` to `0.0`, so that equality, ordering
/// and hashing agree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint(Coordinate<f64>);

impl SweepPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Coordinate { x, y }.into()
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    /// Get the wrapped coordinate.
    #[inline]
    pub fn coord(&self) -> Coordinate<f64> {
        self.0
    }
}

/// Implement sweep ordering: by `x` and then by descending `y`.
impl PartialOrd for SweepPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.0.x.partial_cmp(&other.0.x) {
            Some(Ordering::Equal) => other.0.y.partial_cmp(&self.0.y),
            o => o,
        }
    }
}

/// Derive `Ord` from `PartialOrd` and expect to not fail.
impl Ord for SweepPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap()
    }
}

/// We derive `Eq` manually as `f64` isn't `Eq`.
impl Eq for SweepPoint {}

impl Hash for SweepPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.x.to_bits().hash(state);
        self.0.y.to_bits().hash(state);
    }
}

/// Create from `Coordinate` while checking the components are finite.
impl From<Coordinate<f64>> for SweepPoint {
    fn from(pt: Coordinate<f64>) -> Self {
        assert!(
            pt.x.is_finite(),
            "sweep point requires a finite x-coordinate"
        );
        assert!(
            pt.y.is_finite(),
            "sweep point requires a finite y-coordinate"
        );
        // Adding positive zero maps -0.0 to 0.0 and leaves others as is.
        SweepPoint(Coordinate {
            x: pt.x + 0.0,
            y: pt.y + 0.0,
        })
    }
}

impl From<(f64, f64)> for SweepPoint {
    fn from(pt: (f64, f64)) -> Self {
        SweepPoint::new(pt.0, pt.1)
    }
}

impl fmt::Display for SweepPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.0.x, self.0.y)
    }
}

/// Kind of an [`Event`].
///
/// The ordering of the variants is important for the algorithm.
/// Events at the same point are processed starts first, so that every
/// segment through the point is active, then crossings, and finally
/// ends, so that a crossing at an end point sees both segments.
#[derive(Debug, PartialOrd, Ord, PartialEq, Eq, Hash, Clone, Copy)]
pub enum EventKind {
    Start,
    Intersection,
    End,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EventKind::Start => "START",
            EventKind::Intersection => "INTERSECTION",
            EventKind::End => "END",
        })
    }
}

/// Identity of an event for deduplication and removal.
///
/// The pair of segment keys is stored sorted, so the order in which
/// segments of an intersection are named doesn't matter. Endpoint
/// events use the same key twice.
#[derive(Debug, PartialOrd, Ord, PartialEq, Eq, Hash, Clone, Copy)]
pub struct EventId {
    kind: EventKind,
    pair: (usize, usize),
}

impl EventId {
    pub fn new(kind: EventKind, a: usize, b: usize) -> Self {
        let pair = if a <= b { (a, b) } else { (b, a) };
        EventId { kind, pair }
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The segment keys, smaller first.
    #[inline]
    pub fn pair(&self) -> (usize, usize) {
        self.pair
    }
}

/// A sweep event.
///
/// Segments are referred to by their key in the sweep storage.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// The left end point of `segment`.
    Start { segment: usize, point: SweepPoint },
    /// The right end point of `segment`.
    End { segment: usize, point: SweepPoint },
    /// `above` and `below` meet at `point`. `above` was the upper of
    /// the two when the event was scheduled.
    Intersection {
        above: usize,
        below: usize,
        point: SweepPoint,
    },
}

impl Event {
    /// The point at which the event happens.
    #[inline]
    pub fn point(&self) -> SweepPoint {
        match *self {
            Event::Start { point, .. } => point,
            Event::End { point, .. } => point,
            Event::Intersection { point, .. } => point,
        }
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Start { .. } => EventKind::Start,
            Event::End { .. } => EventKind::End,
            Event::Intersection { .. } => EventKind::Intersection,
        }
    }

    /// The segments involved, in the order they were named.
    pub fn segments(&self) -> (usize, usize) {
        match *self {
            Event::Start { segment, .. } => (segment, segment),
            Event::End { segment, .. } => (segment, segment),
            Event::Intersection { above, below, .. } => (above, below),
        }
    }

    pub fn id(&self) -> EventId {
        let (a, b) = self.segments();
        EventId::new(self.kind(), a, b)
    }
}

/// Equality consistent with the `Ord` impl: same point and identity.
impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

/// Ordering for the timeline: by point in sweep order, then by kind,
/// then by the (unordered) pair of segments.
impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.point()
            .cmp(&other.point())
            .then_with(|| self.id().cmp(&other.id()))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Start { segment, point } | Event::End { segment, point } => {
                write!(f, "{} {} segment {}", self.kind(), point, segment)
            }
            Event::Intersection {
                above,
                below,
                point,
            } => write!(
                f,
                "{} {} segments {} and {}",
                self.kind(),
                point,
                above,
                below
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet};

    use super::*;

    #[test]
    fn test_sweep_point_ordering() {
        let p1 = SweepPoint::new(0., 0.);
        let p2 = SweepPoint::new(1., 1.);
        let p3 = SweepPoint::new(1., 0.);
        let p4 = SweepPoint::new(1., 0.);

        assert!(p1 < p2);
        assert!(p1 < p3);
        // Same x: the higher point comes first.
        assert!(p2 < p3);
        assert!(p3 <= p4);
        assert_eq!(p3, p4);
    }

    #[test]
    fn test_negative_zero() {
        let p = SweepPoint::new(-0., 1.);
        let q = SweepPoint::new(0., 1.);
        assert_eq!(p, q);

        let set: HashSet<_> = vec![p, q].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    #[should_panic]
    fn test_non_finite_point() {
        SweepPoint::new(f64::NAN, 0.);
    }

    #[test]
    fn test_unordered_identity() {
        let pt = SweepPoint::new(2., 2.);
        let e1 = Event::Intersection {
            above: 3,
            below: 1,
            point: pt,
        };
        let e2 = Event::Intersection {
            above: 1,
            below: 3,
            point: pt,
        };
        assert_eq!(e1.id(), e2.id());
        assert_eq!(e1, e2);
        assert_eq!(e1.id().pair(), (1, 3));
        assert_eq!(e1.segments(), (3, 1));
    }

    #[test]
    fn test_event_ordering() {
        let pt = SweepPoint::new(1., 1.);
        let events = vec![
            Event::End {
                segment: 0,
                point: pt,
            },
            Event::Intersection {
                above: 0,
                below: 1,
                point: pt,
            },
            Event::Start {
                segment: 2,
                point: pt,
            },
            Event::Start {
                segment: 3,
                point: SweepPoint::new(1., 0.),
            },
            Event::End {
                segment: 4,
                point: SweepPoint::new(0., -5.),
            },
        ];

        let set: BTreeSet<_> = events.into_iter().collect();
        let order: Vec<_> = set.iter().map(|e| (e.kind(), e.segments().0)).collect();
        assert_eq!(
            order,
            vec![
                (EventKind::End, 4),
                (EventKind::Start, 2),
                (EventKind::Intersection, 0),
                (EventKind::End, 0),
                (EventKind::Start, 3),
            ]
        );
    }
}
