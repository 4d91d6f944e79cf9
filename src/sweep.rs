use std::{collections::HashSet, convert::TryFrom};

use geo::Line;
use itertools::Itertools;
use log::{debug, trace};
use slab::Slab;

use crate::{
    active::ActiveSegments,
    events::{Event, EventKind, SweepPoint},
    segments::{Segment, Tolerance},
    timeline::Timeline,
    Error,
};

/// Sweep algorithm for detecting all intersections.
///
/// Implements the [Bentley-Ottman] sweep: a vertical line moves left to
/// right over a timeline of segment end points and crossings, keeping
/// the segments it currently crosses in vertical order. Crossings are
/// only ever checked between neighbours in that order, and are added
/// to the timeline as they are discovered.
///
/// Events are handled one at a time, but the status is only brought up
/// to date once every event at a point has been handled. At that point
/// the segments through it are a contiguous run of the status, and
/// every pair in the run is reported.
///
/// Segments are stored in a slab; their keys are the segment ids used
/// by events and by the sweep status, and equal the position of the
/// segment in the input.
///
/// [Bentley-Ottman]: //en.wikipedia.org/wiki/Bentley%E2%80%93Ottmann_algorithm
#[derive(Debug)]
pub struct Sweep {
    segments: Slab<Segment>,
    timeline: Timeline,
    active: ActiveSegments,
    tolerance: Tolerance,
    /// Pairs already reported, smaller key first.
    crossed: HashSet<(usize, usize)>,
    /// Segments with an event at the current point.
    at_point: Vec<usize>,
    /// Segments ending at the current point.
    ending: Vec<usize>,
    points: Vec<SweepPoint>,
    trace: Vec<Event>,
}

/// Result of a completed sweep.
#[derive(Debug, Clone)]
pub struct SweepOutput {
    /// Intersection points in the order they were found. Points where
    /// more than two segments meet are repeated once per pair.
    pub points: Vec<SweepPoint>,
    /// All processed events in order.
    pub trace: Vec<Event>,
    /// The input segments, indexed by the keys used in `trace`. Order
    /// keys reflect the last crossing on each segment.
    pub segments: Vec<Segment>,
}

impl Sweep {
    pub fn new<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self::with_tolerance(iter, Tolerance::default())
    }

    pub fn with_tolerance<I: IntoIterator<Item = Segment>>(iter: I, tolerance: Tolerance) -> Self {
        let iter = iter.into_iter();
        let size = {
            let (min_size, max_size) = iter.size_hint();
            max_size.unwrap_or(min_size)
        };

        let mut sweep = Sweep {
            segments: Slab::with_capacity(size),
            timeline: Timeline::with_capacity(2 * size),
            active: ActiveSegments::new(),
            tolerance,
            crossed: HashSet::new(),
            at_point: Vec::new(),
            ending: Vec::new(),
            points: Vec::new(),
            trace: Vec::with_capacity(2 * size),
        };
        for segment in iter {
            sweep.add_segment(segment);
        }
        sweep
    }

    /// Validate and sweep `geo` lines.
    ///
    /// Fails on the first zero-length or non-finite line.
    pub fn from_lines<I: IntoIterator<Item = Line<f64>>>(iter: I) -> Result<Self, Error> {
        let segments = iter
            .into_iter()
            .map(Segment::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Sweep::new(segments))
    }

    /// Store a segment and push its end point events.
    fn add_segment(&mut self, segment: Segment) -> usize {
        let entry = self.segments.vacant_entry();
        let key = entry.key();
        entry.insert(segment);

        self.timeline.push(Event::Start {
            segment: key,
            point: segment.start(),
        });
        self.timeline.push(Event::End {
            segment: key,
            point: segment.end(),
        });
        key
    }

    /// Get the segment stored at `key`.
    #[inline]
    pub fn segment(&self, key: usize) -> &Segment {
        &self.segments[key]
    }

    /// Intersection points found so far.
    #[inline]
    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    /// Events processed so far.
    #[inline]
    pub fn trace(&self) -> &[Event] {
        &self.trace
    }

    /// Segments crossing the sweep line, topmost first.
    #[inline]
    pub fn active(&self) -> &ActiveSegments {
        &self.active
    }

    /// Events not yet processed.
    #[inline]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Peek and return the next point in the sweep.
    #[inline]
    pub fn peek_point(&self) -> Option<SweepPoint> {
        self.timeline.peek().map(|e| e.point())
    }

    /// Intersect two stored segments, the smaller key first.
    fn intersect(&self, a: usize, b: usize) -> Option<SweepPoint> {
        let (a, b) = ordered_pair(a, b);
        self.segments[a].intersect(&self.segments[b], self.tolerance)
    }

    /// Push a crossing event for neighbours `upper` and `lower` if they
    /// intersect at or after `point`.
    fn schedule(&mut self, upper: usize, lower: usize, point: SweepPoint) {
        if self.crossed.contains(&ordered_pair(upper, lower)) {
            return;
        }
        if let Some(crossing) = self.intersect(upper, lower) {
            if crossing >= point {
                let pushed = self.timeline.push(Event::Intersection {
                    above: upper,
                    below: lower,
                    point: crossing,
                });
                if pushed {
                    trace!("scheduled crossing of {} and {} at {}", upper, lower, crossing);
                }
            }
        }
    }

    /// Drop a pending crossing of `a` and `b`; they are no longer
    /// neighbours.
    fn unschedule(&mut self, a: usize, b: usize) {
        if let Some(event) = self.timeline.remove(EventKind::Intersection, a, b) {
            trace!("removed pending {}", event);
        }
    }

    fn handle_start(&mut self, key: usize) {
        self.active.insert(key, &self.segments, self.tolerance);
        self.at_point.push(key);
    }

    fn handle_end(&mut self, key: usize) {
        self.at_point.push(key);
        self.ending.push(key);
    }

    fn handle_intersection(&mut self, above: usize, below: usize) {
        self.at_point.push(above);
        self.at_point.push(below);
    }

    /// Handle one event.
    fn handle_event(&mut self, event: Event) {
        trace!("handling event: {}", event);
        match event {
            Event::Start { segment, .. } => self.handle_start(segment),
            Event::End { segment, .. } => self.handle_end(segment),
            Event::Intersection { above, below, .. } => self.handle_intersection(above, below),
        }
    }

    #[inline]
    fn passes_through(&self, idx: usize, point: SweepPoint) -> bool {
        self.active
            .get(idx)
            .map_or(false, |key| self.segments[key].contains(point, self.tolerance))
    }

    /// Bring the status up to date after the last event at `point`.
    ///
    /// Finds the run of active segments through `point`, reports each
    /// pair in it once, removes the segments ending here and orders the
    /// rest as they are just right of `point`. Only the first and last
    /// segments of the run get new neighbours.
    fn settle(&mut self, point: SweepPoint) -> Result<(), Error> {
        if self.at_point.is_empty() {
            return Ok(());
        }
        let mut first = usize::MAX;
        let mut last = 0;
        for key in self.at_point.drain(..) {
            let idx = self.active.locate(key)?;
            first = first.min(idx);
            last = last.max(idx);
        }
        while first > 0 && self.passes_through(first - 1, point) {
            first -= 1;
        }
        while self.passes_through(last + 1, point) {
            last += 1;
        }

        let mut run: Vec<usize> = self.active.iter().skip(first).take(last + 1 - first).collect();
        if let Some(&segment) = run
            .iter()
            .find(|&&key| !self.segments[key].contains(point, self.tolerance))
        {
            return Err(Error::Misordered { segment, point });
        }

        for (&a, &b) in run.iter().tuple_combinations() {
            let pair = ordered_pair(a, b);
            if self.crossed.contains(&pair) {
                continue;
            }
            if let Some(crossing) = self.intersect(a, b) {
                debug!("{} and {} meet at {}", pair.0, pair.1, crossing);
                self.crossed.insert(pair);
                self.points.push(crossing);
                self.unschedule(a, b);
            }
        }

        let above = first.checked_sub(1).and_then(|idx| self.active.get(idx));
        let below = self.active.get(last + 1);
        for &key in &run {
            if let Some(above) = above {
                self.unschedule(above, key);
            }
            if let Some(below) = below {
                self.unschedule(key, below);
            }
        }
        if let (Some(above), Some(below)) = (above, below) {
            self.unschedule(above, below);
        }

        let ending = std::mem::take(&mut self.ending);
        for &key in &ending {
            self.active.remove(key)?;
        }
        run.retain(|key| !ending.contains(key));

        // With every key at `point`, the order falls back to the slopes.
        for &key in &run {
            self.segments[key].set_key(point);
        }
        for i in first + 1..first + run.len() {
            let mut j = i;
            while j > first {
                let (upper, lower) = match (self.active.get(j - 1), self.active.get(j)) {
                    (Some(upper), Some(lower)) => (upper, lower),
                    _ => break,
                };
                if !self.segments[lower].is_before(&self.segments[upper], self.tolerance) {
                    break;
                }
                self.active.swap(j - 1, j);
                j -= 1;
            }
        }
        trace!("{} segments continue through {}", run.len(), point);

        if run.is_empty() {
            if let (Some(above), Some(below)) = (above, below) {
                self.schedule(above, below, point);
            }
        } else {
            let top = self.active.get(first);
            let bottom = self.active.get(first + run.len() - 1);
            if let (Some(above), Some(top)) = (above, top) {
                self.schedule(above, top, point);
            }
            if let (Some(bottom), Some(below)) = (bottom, below) {
                self.schedule(bottom, below, point);
            }
        }
        Ok(())
    }

    /// Process the next event in the timeline.
    ///
    /// Returns the processed event, or `None` once the sweep is done.
    /// The status is updated with the last event at each point. An
    /// error means the sweep state is inconsistent and the sweep can't
    /// continue.
    pub fn next_event(&mut self) -> Result<Option<Event>, Error> {
        let event = match self.timeline.pop_min() {
            Some(e) => e,
            None => return Ok(None),
        };
        self.trace.push(event);
        self.handle_event(event);

        let point = event.point();
        if self.peek_point() != Some(point) {
            self.settle(point)?;
        }
        Ok(Some(event))
    }

    /// Process all events.
    pub fn run(mut self) -> Result<SweepOutput, Error> {
        while self.next_event()?.is_some() {}
        debug_assert!(self.active.is_empty(), "segments left active after sweep");

        debug!(
            "sweep done: {} events, {} intersections",
            self.trace.len(),
            self.points.len()
        );
        Ok(SweepOutput {
            points: self.points,
            trace: self.trace,
            segments: self.segments.into_iter().map(|(_, s)| s).collect(),
        })
    }
}

#[inline]
fn ordered_pair(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
