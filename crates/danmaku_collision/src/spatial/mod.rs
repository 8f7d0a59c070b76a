//! Spatial partitioning for broad-phase candidate generation
//!
//! The detector never tests all pairs: it asks a [`SpatialIndex`] for the
//! keys whose bounds plausibly overlap a region, then runs the matrix gate
//! and narrow-phase math on that candidate set only.
//!
//! [`UniformGrid`] is the production structure; [`ExhaustiveIndex`] is a
//! brute-force implementation kept as the correctness reference for tests.

mod exhaustive;
mod grid;

pub use exhaustive::ExhaustiveIndex;
pub use grid::{GridConfig, UniformGrid};

use crate::geometry::Aabb;
use crate::intersection::IntersectionKey;

/// Abstract broad-phase index over registered intersections
///
/// Implementations may return false positives from [`query`](Self::query)
/// but never false negatives. Query output must be sorted by key and free
/// of duplicates so the per-frame scan is deterministic regardless of any
/// internal hash ordering.
pub trait SpatialIndex {
    /// Insert a key with its current bounds
    fn insert(&mut self, key: IntersectionKey, aabb: &Aabb);

    /// Remove a key; `aabb` must be the bounds it was last stored under
    fn remove(&mut self, key: IntersectionKey, aabb: &Aabb);

    /// Move a key from `old` bounds to `new` bounds
    fn update(&mut self, key: IntersectionKey, old: &Aabb, new: &Aabb) {
        self.remove(key, old);
        self.insert(key, new);
    }

    /// Append all candidate keys whose stored bounds may overlap `aabb`
    ///
    /// Appends to `out` (which is cleared first), sorted and deduplicated.
    fn query(&self, aabb: &Aabb, out: &mut Vec<IntersectionKey>);

    /// Remove everything
    fn clear(&mut self);

    /// Number of stored keys
    fn len(&self) -> usize;

    /// Whether the index is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
