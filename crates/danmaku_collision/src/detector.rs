//! Per-frame collision detection engine
//!
//! [`CollisionDetector`] owns every live [`Intersection`], keeps the
//! spatial index in sync, and once per simulation frame resolves which
//! registered shapes overlap. Qualifying pairs are reported to the game
//! object layer through the [`CollisionWorld`] trait; the detector itself
//! performs no gameplay logic, only delivery.
//!
//! # Determinism
//!
//! Replays require the same registration sequence to produce the same
//! callback sequence. The scan iterates intersections in slot order,
//! candidate lists come back from the index sorted and deduplicated, and
//! each unordered pair is visited exactly once (`other > current`), so no
//! hash iteration order ever leaks into results.

use log::{debug, trace};
use slotmap::SlotMap;

use crate::config::CollisionConfig;
use crate::geometry::{Shape, ShapeError};
use crate::group::{CollisionGroup, CollisionMatrix, GroupMask};
use crate::intersection::{Intersection, IntersectionKey, Lifetime, OwnerId};
use crate::spatial::{GridConfig, SpatialIndex, UniformGrid};

/// One side of a reported collision
///
/// Everything a reaction needs without reaching back into the detector:
/// the handle, the owner, and copies of the group and shape as tested.
#[derive(Debug, Clone, Copy)]
pub struct HitContext {
    /// Handle of the intersection that collided
    pub key: IntersectionKey,
    /// The registering game object
    pub owner: OwnerId,
    /// Group the shape was registered under
    pub group: CollisionGroup,
    /// The shape as it was when the pair was tested
    pub shape: Shape,
}

/// The external game-object layer, passed into every pass explicitly
///
/// The detector holds no reference to game objects; it resolves liveness
/// and delivers reactions exclusively through this trait.
pub trait CollisionWorld {
    /// Is the owner still alive? Dead owners are skipped silently.
    fn is_alive(&self, owner: OwnerId) -> bool;

    /// React to a collision; called once per side of each qualifying pair
    fn on_collision(&mut self, me: &HitContext, other: &HitContext);
}

/// A match from an ad-hoc shape query
#[derive(Debug, Clone, Copy)]
pub struct QueryHit {
    /// Handle of the matching intersection
    pub key: IntersectionKey,
    /// Its owner
    pub owner: OwnerId,
    /// Its group
    pub group: CollisionGroup,
    /// Its current shape
    pub shape: Shape,
}

struct Entry {
    shape: Shape,
    group: CollisionGroup,
    owner: OwnerId,
    lifetime: Lifetime,
}

/// Owns all live intersections and runs the per-frame resolution pass
pub struct CollisionDetector {
    entries: SlotMap<IntersectionKey, Entry>,
    index: Box<dyn SpatialIndex>,
    matrix: CollisionMatrix,
    temporaries: Vec<IntersectionKey>,
    scratch: Vec<IntersectionKey>,
}

impl CollisionDetector {
    /// Create a grid-backed detector
    pub fn new(matrix: CollisionMatrix, grid: GridConfig) -> Self {
        Self::with_index(matrix, Box::new(UniformGrid::new(grid)))
    }

    /// Create a detector over a caller-supplied spatial index
    pub fn with_index(matrix: CollisionMatrix, index: Box<dyn SpatialIndex>) -> Self {
        Self {
            entries: SlotMap::with_key(),
            index,
            matrix,
            temporaries: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Create a detector from a loaded [`CollisionConfig`]
    pub fn from_config(config: &CollisionConfig) -> Self {
        Self::new(config.matrix(), config.grid.clone())
    }

    /// The group compatibility matrix in use
    pub fn matrix(&self) -> &CollisionMatrix {
        &self.matrix
    }

    /// Register an intersection that lives until its owner removes it
    ///
    /// Malformed shapes (NaN, negative radius/width) are rejected before
    /// touching the index; the caller may ignore the error, the frame's
    /// pass is unaffected either way.
    pub fn add(&mut self, intersection: Intersection) -> Result<IntersectionKey, ShapeError> {
        self.add_with_lifetime(intersection, Lifetime::Persistent)
    }

    /// Register an intersection for the current frame only
    ///
    /// Purged unconditionally by the next [`test_all_collision`]
    /// (matched or not), so script-declared one-shot regions never leak
    /// across frames.
    ///
    /// [`test_all_collision`]: Self::test_all_collision
    pub fn add_temporary(
        &mut self,
        intersection: Intersection,
    ) -> Result<IntersectionKey, ShapeError> {
        self.add_with_lifetime(intersection, Lifetime::Temporary)
    }

    fn add_with_lifetime(
        &mut self,
        intersection: Intersection,
        lifetime: Lifetime,
    ) -> Result<IntersectionKey, ShapeError> {
        if let Err(err) = intersection.shape.validate() {
            debug!(
                "rejected {:?} intersection for owner {:?}: {err}",
                intersection.group, intersection.owner
            );
            return Err(err);
        }
        let aabb = intersection.shape.aabb();
        let key = self.entries.insert(Entry {
            shape: intersection.shape,
            group: intersection.group,
            owner: intersection.owner,
            lifetime,
        });
        self.index.insert(key, &aabb);
        if lifetime == Lifetime::Temporary {
            self.temporaries.push(key);
        }
        Ok(key)
    }

    /// Remove an intersection
    ///
    /// Idempotent: removing an unknown or already-removed handle is a
    /// no-op, since object destruction paths may race within a frame.
    pub fn remove(&mut self, key: IntersectionKey) {
        if let Some(entry) = self.entries.remove(key) {
            self.index.remove(key, &entry.shape.aabb());
        }
    }

    /// Reposition an intersection without changing its identity
    ///
    /// The per-frame path for moving objects; cheaper than remove +
    /// re-add when the shape stays within its grid cells. Unknown handles
    /// are a no-op.
    pub fn update(&mut self, key: IntersectionKey, shape: Shape) -> Result<(), ShapeError> {
        shape.validate()?;
        if let Some(entry) = self.entries.get_mut(key) {
            let old = entry.shape.aabb();
            entry.shape = shape;
            self.index.update(key, &old, &shape.aabb());
        }
        Ok(())
    }

    /// Resolve all overlapping pairs for this frame
    ///
    /// Broad phase per entry, matrix gate before any geometry, each
    /// unordered pair tested exactly once. All temporaries are purged
    /// after the scan and *before* any reaction callback runs, so the
    /// purge happens even if a callback panics. Owner liveness is checked
    /// at delivery time: a pair whose owner was killed by an earlier
    /// pair's reaction in the same pass is skipped silently.
    pub fn test_all_collision(&mut self, world: &mut dyn CollisionWorld) {
        let mut hits: Vec<(HitContext, HitContext)> = Vec::new();
        let mut candidates = std::mem::take(&mut self.scratch);

        for (key, entry) in &self.entries {
            self.index.query(&entry.shape.aabb(), &mut candidates);
            for &other_key in &candidates {
                // visit each unordered pair once, never (x, x)
                if other_key <= key {
                    continue;
                }
                let Some(other) = self.entries.get(other_key) else {
                    continue;
                };
                if !self.matrix.can_collide(entry.group, other.group) {
                    continue;
                }
                if !entry.shape.overlaps(&other.shape) {
                    continue;
                }
                hits.push((
                    HitContext {
                        key,
                        owner: entry.owner,
                        group: entry.group,
                        shape: entry.shape,
                    },
                    HitContext {
                        key: other_key,
                        owner: other.owner,
                        group: other.group,
                        shape: other.shape,
                    },
                ));
            }
        }

        candidates.clear();
        self.scratch = candidates;

        // Hard per-frame reset, before any user code can run
        self.purge_temporaries();

        trace!(
            "collision pass: {} intersections, {} overlapping pairs",
            self.entries.len(),
            hits.len()
        );

        for (a, b) in &hits {
            if world.is_alive(a.owner) && world.is_alive(b.owner) {
                world.on_collision(a, b);
            }
            // the first reaction may have killed either side
            if world.is_alive(a.owner) && world.is_alive(b.owner) {
                world.on_collision(b, a);
            }
        }
    }

    fn purge_temporaries(&mut self) {
        for key in std::mem::take(&mut self.temporaries) {
            // stale keys (already removed by hand) fail the generation
            // check inside the slotmap and fall through harmlessly
            if let Some(entry) = self.entries.remove(key) {
                self.index.remove(key, &entry.shape.aabb());
            }
        }
    }

    /// Ad-hoc query: every registered intersection overlapping `shape`
    ///
    /// Runs through the same spatial index as the per-frame pass.
    /// `filter` restricts results to the given groups; pass
    /// [`GroupMask::ALL`] for everything. Malformed query shapes return
    /// an empty result. Non-mutating; usable any time between passes.
    pub fn query_shape(&self, shape: &Shape, filter: GroupMask) -> Vec<QueryHit> {
        let mut out = Vec::new();
        if shape.validate().is_err() {
            debug!("rejected malformed query shape {shape:?}");
            return out;
        }
        let mut candidates = Vec::new();
        self.index.query(&shape.aabb(), &mut candidates);
        for key in candidates {
            let Some(entry) = self.entries.get(key) else {
                continue;
            };
            if !filter.contains(entry.group) {
                continue;
            }
            if !shape.overlaps(&entry.shape) {
                continue;
            }
            out.push(QueryHit {
                key,
                owner: entry.owner,
                group: entry.group,
                shape: entry.shape,
            });
        }
        out
    }

    /// Circle query convenience ("delete all shots in this circle")
    pub fn query_circle(&self, x: f32, y: f32, radius: f32, filter: GroupMask) -> Vec<QueryHit> {
        self.query_shape(&Shape::circle(x, y, radius), filter)
    }

    /// Segment query convenience ("erase shots along this line")
    pub fn query_segment(
        &self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        filter: GroupMask,
    ) -> Vec<QueryHit> {
        self.query_shape(&Shape::capsule(x1, y1, x2, y2, width), filter)
    }

    /// Enumerate all live intersections, in slot order
    ///
    /// Feed for the hitbox debug overlay.
    pub fn iter(&self) -> impl Iterator<Item = QueryHit> + '_ {
        self.entries.iter().map(|(key, entry)| QueryHit {
            key,
            owner: entry.owner,
            group: entry.group,
            shape: entry.shape,
        })
    }

    /// Number of live intersections
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no intersections are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every intersection, temporary or not
    pub fn clear(&mut self) {
        self.entries.clear();
        self.temporaries.clear();
        self.index.clear();
    }
}
