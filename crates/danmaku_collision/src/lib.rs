//! # danmaku_collision
//!
//! Real-time collision detection core for a bullet-hell shooter engine.
//!
//! Every simulation frame, hundreds to thousands of shots, lasers, hurt
//! circles and pickup magnets move; this crate decides which of them
//! currently overlap, filtered by a group compatibility matrix, and
//! reports each qualifying pair back to the owning game objects.
//!
//! ## Features
//!
//! - **Two-phase detection**: uniform-grid broad phase, squared-distance
//!   circle/capsule narrow phase
//! - **Group matrix**: pairs are gated by a symmetric compatibility
//!   matrix before any geometry runs
//! - **Deterministic**: identical registration sequences produce
//!   identical callback sequences, frame after frame
//! - **Frame-scoped temporaries**: script-declared one-shot regions are
//!   purged unconditionally at the end of every pass
//! - **Ad-hoc queries**: circle and segment region queries for scripted
//!   effects, through the same spatial index
//!
//! ## Quick Start
//!
//! ```rust
//! use danmaku_collision::prelude::*;
//!
//! struct Objects; // the game-object layer, elided here
//!
//! impl CollisionWorld for Objects {
//!     fn is_alive(&self, _owner: OwnerId) -> bool {
//!         true
//!     }
//!     fn on_collision(&mut self, me: &HitContext, other: &HitContext) {
//!         // damage, graze, pickup, deletion...
//!         let _ = (me, other);
//!     }
//! }
//!
//! let mut detector = CollisionDetector::new(CollisionMatrix::standard(), GridConfig::default());
//! let shot = Intersection::new(
//!     Shape::circle(0.0, 0.0, 5.0),
//!     CollisionGroup::EnemyShot,
//!     OwnerId::new(0, 0),
//! );
//! detector.add(shot).unwrap();
//!
//! let mut objects = Objects;
//! detector.test_all_collision(&mut objects); // once per simulation frame
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod detector;
pub mod foundation;
pub mod geometry;
pub mod group;
pub mod intersection;
pub mod spatial;

pub use config::{CollisionConfig, Config, ConfigError};
pub use detector::{CollisionDetector, CollisionWorld, HitContext, QueryHit};
pub use geometry::{Aabb, Shape, ShapeError};
pub use group::{CollisionGroup, CollisionMatrix, GroupMask};
pub use intersection::{Intersection, IntersectionKey, Lifetime, OwnerId};
pub use spatial::{ExhaustiveIndex, GridConfig, SpatialIndex, UniformGrid};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{CollisionConfig, Config},
        detector::{CollisionDetector, CollisionWorld, HitContext, QueryHit},
        foundation::math::{Point2, Vec2},
        geometry::{Shape, ShapeError},
        group::{CollisionGroup, CollisionMatrix, GroupMask},
        intersection::{Intersection, IntersectionKey, OwnerId},
        spatial::GridConfig,
    };
}
