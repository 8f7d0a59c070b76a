//! The registered collidable unit
//!
//! An [`Intersection`] ties a [`Shape`] to the [`CollisionGroup`] it was
//! registered under and to the game object that owns it. Ownership of the
//! record itself lives in the [`CollisionDetector`](crate::CollisionDetector);
//! the game object only decides *what* to register and reacts to hits.
//!
//! Owners are addressed by [`OwnerId`], a generation-checked handle into a
//! table the detector never sees. Liveness is resolved through the
//! [`CollisionWorld`](crate::CollisionWorld) trait at dispatch time, so a
//! dead owner is a routine skip rather than a dangling reference.

use crate::geometry::Shape;
use crate::group::CollisionGroup;

slotmap::new_key_type! {
    /// Handle to a registered intersection inside the detector
    pub struct IntersectionKey;
}

/// Generation-checked handle addressing the owning game object
///
/// The detector treats this as opaque: it stores the id at registration
/// and hands it back in callbacks and query results. The generation lets
/// the object table reject stale handles after a slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId {
    /// Slot index in the external object table
    pub index: u32,
    /// Generation counter for the slot
    pub generation: u32,
}

impl OwnerId {
    /// Create an owner handle
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

/// How long a registered intersection lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Lives until the owner removes it
    Persistent,
    /// Purged unconditionally at the end of the current frame's pass
    Temporary,
}

/// A shape registered for collision testing
#[derive(Debug, Clone, Copy)]
pub struct Intersection {
    /// The collidable geometry
    pub shape: Shape,
    /// Why the shape exists; gates pair eligibility via the matrix
    pub group: CollisionGroup,
    /// The registering game object
    pub owner: OwnerId,
}

impl Intersection {
    /// Create an intersection record
    pub fn new(shape: Shape, group: CollisionGroup, owner: OwnerId) -> Self {
        Self {
            shape,
            group,
            owner,
        }
    }
}
