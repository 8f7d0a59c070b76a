//! Collidable shape primitives
//!
//! Two primitives cover every hitbox in the game: circles (shots, hurt
//! circles, pickup magnets) and capsules (lasers and other segment-shaped
//! volumes, a line segment thickened by half the width on each side).
//!
//! # Boundary convention
//!
//! Overlap tests are inclusive: shapes whose boundaries exactly touch
//! (`d == r1 + r2`) count as overlapping. The intersection debug overlay
//! draws the same outlines, so a visually touching pair is a hit.

use crate::foundation::math::{distance_sq, Point2, Vec2};
use crate::geometry::aabb::Aabb;

/// Reasons a shape is rejected at registration time
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// A coordinate is NaN or infinite
    #[error("shape has a non-finite coordinate")]
    NonFinite,

    /// Circle radius is negative
    #[error("circle radius must be non-negative")]
    NegativeRadius,

    /// Capsule width is negative
    #[error("capsule width must be non-negative")]
    NegativeWidth,
}

/// A collidable shape, immutable once constructed
///
/// Zero-radius circles and zero-width capsules are legal and behave as a
/// point and a bare segment respectively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Circle with center and radius
    Circle {
        /// Center in playfield coordinates
        center: Point2,
        /// Radius, `>= 0`
        radius: f32,
    },
    /// Line segment from `a` to `b` thickened by `width / 2` on each side
    Capsule {
        /// First endpoint
        a: Point2,
        /// Second endpoint
        b: Point2,
        /// Full width, `>= 0`
        width: f32,
    },
}

impl Shape {
    /// Create a circle shape
    pub fn circle(x: f32, y: f32, radius: f32) -> Self {
        Self::Circle {
            center: Point2::new(x, y),
            radius,
        }
    }

    /// Create a capsule shape from segment endpoints and a full width
    pub fn capsule(x1: f32, y1: f32, x2: f32, y2: f32, width: f32) -> Self {
        Self::Capsule {
            a: Point2::new(x1, y1),
            b: Point2::new(x2, y2),
            width,
        }
    }

    /// Validate the shape for registration
    ///
    /// Rejects non-finite coordinates and negative radius/width so a
    /// malformed script call can never corrupt the broad-phase buckets.
    pub fn validate(&self) -> Result<(), ShapeError> {
        match *self {
            Self::Circle { center, radius } => {
                if !(center.x.is_finite() && center.y.is_finite() && radius.is_finite()) {
                    return Err(ShapeError::NonFinite);
                }
                if radius < 0.0 {
                    return Err(ShapeError::NegativeRadius);
                }
            }
            Self::Capsule { a, b, width } => {
                let finite = a.x.is_finite()
                    && a.y.is_finite()
                    && b.x.is_finite()
                    && b.y.is_finite()
                    && width.is_finite();
                if !finite {
                    return Err(ShapeError::NonFinite);
                }
                if width < 0.0 {
                    return Err(ShapeError::NegativeWidth);
                }
            }
        }
        Ok(())
    }

    /// Test whether two shapes overlap
    ///
    /// Symmetric by construction; touching boundaries count as overlap.
    /// All comparisons are on squared distances.
    pub fn overlaps(&self, other: &Shape) -> bool {
        match (*self, *other) {
            (
                Self::Circle {
                    center: c1,
                    radius: r1,
                },
                Self::Circle {
                    center: c2,
                    radius: r2,
                },
            ) => {
                let reach = r1 + r2;
                distance_sq(c1, c2) <= reach * reach
            }
            (Self::Circle { center, radius }, Self::Capsule { a, b, width })
            | (Self::Capsule { a, b, width }, Self::Circle { center, radius }) => {
                let reach = radius + width * 0.5;
                point_segment_distance_sq(center, a, b) <= reach * reach
            }
            (
                Self::Capsule {
                    a: a1,
                    b: b1,
                    width: w1,
                },
                Self::Capsule {
                    a: a2,
                    b: b2,
                    width: w2,
                },
            ) => {
                let reach = (w1 + w2) * 0.5;
                segment_segment_distance_sq(a1, b1, a2, b2) <= reach * reach
            }
        }
    }

    /// Conservative axis-aligned bounds for broad-phase bucketing
    pub fn aabb(&self) -> Aabb {
        match *self {
            Self::Circle { center, radius } => {
                Aabb::from_center_extents(center, Vec2::new(radius, radius))
            }
            Self::Capsule { a, b, width } => {
                let half = width * 0.5;
                let min = Point2::new(a.x.min(b.x) - half, a.y.min(b.y) - half);
                let max = Point2::new(a.x.max(b.x) + half, a.y.max(b.y) + half);
                Aabb::new(min, max)
            }
        }
    }
}

/// Squared distance from point `p` to segment `ab`
///
/// Clamps the projection of `p` onto the segment to `[0, 1]`; a
/// zero-length segment degenerates to point-to-point distance.
fn point_segment_distance_sq(p: Point2, a: Point2, b: Point2) -> f32 {
    let ab = b - a;
    let len_sq = ab.magnitude_squared();
    if len_sq <= f32::EPSILON {
        return distance_sq(p, a);
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    distance_sq(p, a + ab * t)
}

/// Squared distance between segments `p1q1` and `p2q2`
///
/// Closest-point computation with region clamping; handles segments that
/// degenerate to points on either side.
fn segment_segment_distance_sq(p1: Point2, q1: Point2, p2: Point2, q2: Point2) -> f32 {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.magnitude_squared();
    let e = d2.magnitude_squared();
    let f = d2.dot(&r);

    if a <= f32::EPSILON && e <= f32::EPSILON {
        // both segments are points
        return r.magnitude_squared();
    }

    let mut s;
    let mut t;
    if a <= f32::EPSILON {
        // first segment is a point
        s = 0.0;
        t = (f / e).clamp(0.0, 1.0);
    } else {
        let c = d1.dot(&r);
        if e <= f32::EPSILON {
            // second segment is a point
            t = 0.0;
            s = (-c / a).clamp(0.0, 1.0);
        } else {
            let b = d1.dot(&d2);
            let denom = a * e - b * b;

            // Closest point on infinite line 1 to line 2, clamped to the
            // segment; denom == 0 means the segments are parallel.
            s = if denom != 0.0 {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };

            let t_nom = b * s + f;
            if t_nom < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if t_nom > e {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            } else {
                t = t_nom / e;
            }
        }
    }

    let c1 = p1 + d1 * s;
    let c2 = p2 + d2 * t;
    distance_sq(c1, c2)
}
