//! Math utilities and types
//!
//! Provides the fundamental 2D math types used by the collision engine.
//! The playfield is a flat 2D plane; everything is `f32`.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Squared distance between two points
pub fn distance_sq(a: Point2, b: Point2) -> f32 {
    (a - b).magnitude_squared()
}
