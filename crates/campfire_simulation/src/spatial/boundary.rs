//! World containment policies.
//!
//! Two interchangeable policies over the same circle (origin, radius):
//! - clamp-by-projection: for NPCs that move smoothly (the agent)
//! - rollback-to-last-valid: for player input, free movement up to the edge

use bevy::prelude::*;

use super::horizontal_length;

/// Projects `position` back onto the boundary circle if it is outside.
///
/// Direction and `y` are preserved; inside positions are returned unchanged.
pub fn clamp_by_projection(position: Vec3, radius: f32) -> Vec3 {
    let distance = horizontal_length(position);
    if distance <= radius || distance == 0.0 {
        return position;
    }

    let scale = radius / distance;
    Vec3::new(position.x * scale, position.y, position.z * scale)
}

/// Restores the last in-bounds position when a move crosses the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollbackBoundary {
    pub radius: f32,
    last_valid: Vec3,
}

impl RollbackBoundary {
    /// `start` is taken as valid as-is (the spawn point is trusted).
    pub fn new(radius: f32, start: Vec3) -> Self {
        Self {
            radius,
            last_valid: start,
        }
    }

    pub fn last_valid(&self) -> Vec3 {
        self.last_valid
    }

    /// Returns the position to use this tick and remembers it if valid.
    pub fn apply(&mut self, position: Vec3) -> Vec3 {
        if horizontal_length(position) > self.radius {
            self.last_valid
        } else {
            self.last_valid = position;
            position
        }
    }

    /// Teleports bypass the rollback (respawn).
    pub fn reset(&mut self, position: Vec3) {
        self.last_valid = position;
    }
}

/// Which policy a consumer uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryPolicy {
    ClampByProjection,
    RollbackToLastValid,
}

/// Containment component: a policy plus the state rollback needs.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum Containment {
    Clamp { radius: f32 },
    Rollback(RollbackBoundary),
}

impl Containment {
    pub fn new(policy: BoundaryPolicy, radius: f32, start: Vec3) -> Self {
        match policy {
            BoundaryPolicy::ClampByProjection => Self::Clamp { radius },
            BoundaryPolicy::RollbackToLastValid => {
                Self::Rollback(RollbackBoundary::new(radius, start))
            }
        }
    }

    pub fn policy(&self) -> BoundaryPolicy {
        match self {
            Self::Clamp { .. } => BoundaryPolicy::ClampByProjection,
            Self::Rollback(_) => BoundaryPolicy::RollbackToLastValid,
        }
    }

    pub fn apply(&mut self, position: Vec3) -> Vec3 {
        match self {
            Self::Clamp { radius } => clamp_by_projection(position, *radius),
            Self::Rollback(rollback) => rollback.apply(position),
        }
    }

    pub fn reset(&mut self, position: Vec3) {
        if let Self::Rollback(rollback) = self {
            rollback.reset(position);
        }
    }
}
