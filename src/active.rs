use slab::Slab;

use crate::{segments::Segment, Error, Tolerance};

/// Segments currently crossing the sweep line, topmost first.
///
/// Entries are keys into the sweep's segment storage. Order is given by
/// [`Segment::is_before`], which is only locally consistent around the
/// current sweep position, so the entries can't live in an ordered tree
/// keyed by segment: crossings are applied by swapping neighbours in
/// place. Insertion uses binary search but insert, remove and locate
/// shift or scan the vector and cost `O(n)`.
#[derive(Debug, Default)]
pub struct ActiveSegments {
    keys: Vec<usize>,
}

impl ActiveSegments {
    pub fn new() -> Self {
        Default::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Insert `key` in order and return its index.
    ///
    /// The segment goes after every entry it is not strictly before.
    pub fn insert(&mut self, key: usize, storage: &Slab<Segment>, tol: Tolerance) -> usize {
        debug_assert!(storage.contains(key));
        debug_assert!(!self.keys.contains(&key), "segment is already active");
        let segment = &storage[key];
        let idx = self
            .keys
            .partition_point(|&other| !segment.is_before(&storage[other], tol));
        self.keys.insert(idx, key);
        idx
    }

    /// Index of `key`.
    pub fn locate(&self, key: usize) -> Result<usize, Error> {
        self.keys
            .iter()
            .position(|&k| k == key)
            .ok_or(Error::NotFound { segment: key })
    }

    pub fn remove(&mut self, key: usize) -> Result<(), Error> {
        let idx = self.locate(key)?;
        self.keys.remove(idx);
        Ok(())
    }

    /// Exchange the entries at two positions.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.keys.swap(i, j);
    }

    /// The key at `idx`.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<usize> {
        self.keys.get(idx).copied()
    }

    /// The segment directly above the one at `idx`.
    #[inline]
    pub fn above(&self, idx: usize) -> Option<usize> {
        idx.checked_sub(1).and_then(|i| self.get(i))
    }

    /// The segment directly below the one at `idx`.
    #[inline]
    pub fn below(&self, idx: usize) -> Option<usize> {
        self.get(idx + 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.keys.iter().copied()
    }
}
