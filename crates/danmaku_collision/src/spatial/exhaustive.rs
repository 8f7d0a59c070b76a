//! Brute-force reference index
//!
//! Stores every key in one flat list and answers queries by testing each
//! stored AABB. O(n) per query, so only useful as the correctness oracle
//! the grid is compared against in tests, and for tiny populations.

use crate::geometry::Aabb;
use crate::intersection::IntersectionKey;
use crate::spatial::SpatialIndex;

/// Flat-list implementation of [`SpatialIndex`]
#[derive(Default)]
pub struct ExhaustiveIndex {
    entries: Vec<(IntersectionKey, Aabb)>,
}

impl ExhaustiveIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpatialIndex for ExhaustiveIndex {
    fn insert(&mut self, key: IntersectionKey, aabb: &Aabb) {
        self.entries.push((key, *aabb));
    }

    fn remove(&mut self, key: IntersectionKey, _aabb: &Aabb) {
        if let Some(pos) = self.entries.iter().position(|&(k, _)| k == key) {
            self.entries.swap_remove(pos);
        }
    }

    fn update(&mut self, key: IntersectionKey, _old: &Aabb, new: &Aabb) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = *new;
        }
    }

    fn query(&self, aabb: &Aabb, out: &mut Vec<IntersectionKey>) {
        out.clear();
        out.extend(
            self.entries
                .iter()
                .filter(|(_, bounds)| bounds.intersects(aabb))
                .map(|&(k, _)| k),
        );
        out.sort_unstable();
        out.dedup();
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
