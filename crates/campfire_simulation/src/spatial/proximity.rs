//! Edge-triggered distance comparator.
//!
//! Tracks a boolean "near" flag between two positions and reports only the
//! flips. With distinct enter/exit radii it doubles as the hysteresis band
//! the agent uses for pursuit.

use bevy::prelude::*;

use super::horizontal_distance;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityEdge {
    Entered,
    Exited,
}

impl ProximityEdge {
    pub fn is_near(self) -> bool {
        matches!(self, Self::Entered)
    }
}

/// Near when distance < `enter_radius`, far again when distance > `exit_radius`.
///
/// Invariant: `exit_radius >= enter_radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityMonitor {
    enter_radius: f32,
    exit_radius: f32,
    near: bool,
}

impl ProximityMonitor {
    /// Single threshold.
    pub fn new(threshold: f32) -> Self {
        Self::with_hysteresis(threshold, threshold)
    }

    /// Separate enter/exit thresholds; `exit_radius` below `enter_radius` is raised to it.
    pub fn with_hysteresis(enter_radius: f32, exit_radius: f32) -> Self {
        Self {
            enter_radius,
            exit_radius: exit_radius.max(enter_radius),
            near: false,
        }
    }

    pub fn is_near(&self) -> bool {
        self.near
    }

    pub fn enter_radius(&self) -> f32 {
        self.enter_radius
    }

    pub fn exit_radius(&self) -> f32 {
        self.exit_radius
    }

    /// Feeds a distance; returns the edge only on the tick the flag flips.
    pub fn observe_distance(&mut self, distance: f32) -> Option<ProximityEdge> {
        if !self.near && distance < self.enter_radius {
            self.near = true;
            Some(ProximityEdge::Entered)
        } else if self.near && distance > self.exit_radius {
            self.near = false;
            Some(ProximityEdge::Exited)
        } else {
            None
        }
    }

    /// Horizontal distance between `a` and `b`, see [`Self::observe_distance`].
    pub fn update(&mut self, a: Vec3, b: Vec3) -> Option<ProximityEdge> {
        self.observe_distance(horizontal_distance(a, b))
    }

    /// Forces the flag without reporting an edge.
    pub fn reset(&mut self, near: bool) {
        self.near = near;
    }
}
