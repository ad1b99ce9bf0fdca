//! Spatial primitives: containment and proximity.
//!
//! Only the horizontal plane (x/z) matters for game logic; `y` is carried
//! through untouched or pinned to ground level by the caller.

use bevy::prelude::*;

pub mod boundary;
pub mod proximity;
pub mod zones;


pub use boundary::{clamp_by_projection, BoundaryPolicy, Containment, RollbackBoundary};
pub use proximity::{ProximityEdge, ProximityMonitor};
pub use zones::{spawn_proximity_zone, ProximityChanged, ProximityZone};

/// Below this length a horizontal direction is treated as degenerate.
pub const DIRECTION_EPSILON: f32 = 1e-4;

/// Drops the vertical component.
#[inline]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

#[inline]
pub fn horizontal_length(v: Vec3) -> f32 {
    Vec2::new(v.x, v.z).length()
}

#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    horizontal_length(a - b)
}

/// Unit horizontal direction from `from` to `to`, `None` when they coincide
/// (or the input is not finite).
pub fn horizontal_direction(from: Vec3, to: Vec3) -> Option<Vec3> {
    let delta = horizontal(to - from);
    if !delta.is_finite() || delta.length() < DIRECTION_EPSILON {
        return None;
    }
    delta.try_normalize()
}
