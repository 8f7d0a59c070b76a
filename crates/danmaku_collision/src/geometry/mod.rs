//! Geometric primitives for collision testing
//!
//! # Module Organization
//!
//! - [`shape`] - The collidable [`Shape`] enum and its overlap tests
//! - [`aabb`] - Axis-aligned bounds used by the broad phase
//!
//! All narrow-phase math works on squared distances; square roots never
//! appear on the hot path.

pub mod aabb;
pub mod shape;

pub use aabb::Aabb;
pub use shape::{Shape, ShapeError};
