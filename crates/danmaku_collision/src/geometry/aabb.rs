//! 2D axis-aligned bounding boxes
//!
//! Conservative bounds around shapes, consumed by the spatial index for
//! broad-phase bucketing. Never used for the narrow-phase verdict.

use crate::foundation::math::{Point2, Vec2};

/// Axis-aligned bounding box in playfield coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Point2,
    /// Maximum corner of the bounding box
    pub max: Point2,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given half-extents
    pub fn from_center_extents(center: Point2, extents: Vec2) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Point2 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Point2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}
