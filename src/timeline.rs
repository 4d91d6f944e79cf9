use std::collections::{BTreeSet, HashMap};

use crate::events::{Event, EventId, EventKind};

/// Pending events of a sweep.
///
/// Events are ordered by point (see [`SweepPoint`]), then by kind and
/// segments. At most one event exists per [`EventId`]; the index from
/// identity to event supports removal without knowing the event point.
/// All operations are `O(log n)` except for the hashing.
///
/// [`SweepPoint`]: crate::SweepPoint
#[derive(Debug, Default)]
pub struct Timeline {
    events: BTreeSet<Event>,
    index: HashMap<EventId, Event>,
}

impl Timeline {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_capacity(size: usize) -> Self {
        Timeline {
            events: BTreeSet::new(),
            index: HashMap::with_capacity(size),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Insert an event unless one with the same identity is pending.
    ///
    /// Returns `true` if the event was inserted.
    pub fn push(&mut self, event: Event) -> bool {
        let id = event.id();
        if self.index.contains_key(&id) {
            return false;
        }
        let inserted = self.events.insert(event);
        debug_assert!(inserted, "timeline and its index are out of sync");
        self.index.insert(id, event);
        true
    }

    /// The next event to process.
    #[inline]
    pub fn peek(&self) -> Option<&Event> {
        self.events.iter().next()
    }

    /// Remove and return the next event to process.
    pub fn pop_min(&mut self) -> Option<Event> {
        let event = self.events.pop_first()?;
        self.index.remove(&event.id());
        Some(event)
    }

    /// Remove the event for `kind` and segments `a`, `b` (in any order)
    /// if pending.
    ///
    /// The event may already have fired, or never have been scheduled;
    /// neither is an error.
    pub fn remove(&mut self, kind: EventKind, a: usize, b: usize) -> Option<Event> {
        let event = self.index.remove(&EventId::new(kind, a, b))?;
        let removed = self.events.remove(&event);
        debug_assert!(removed, "timeline and its index are out of sync");
        Some(event)
    }

    pub fn contains(&self, kind: EventKind, a: usize, b: usize) -> bool {
        self.index.contains_key(&EventId::new(kind, a, b))
    }

    /// Iterate over the pending events in order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> + '_ {
        self.events.iter()
    }
}
