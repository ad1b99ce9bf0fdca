//! Wander destination sampling.
//!
//! A candidate is drawn around the agent (uniform angle, distance in the
//! configured range), projected back inside the world boundary, then pushed
//! out of the protected zone.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use crate::config::{AgentSettings, BoundaryConfig};
use crate::spatial::{clamp_by_projection, horizontal_direction, horizontal_distance};

pub fn sample_wander_destination<R: Rng + ?Sized>(
    origin: Vec3,
    settings: &AgentSettings,
    rng: &mut R,
) -> Vec3 {
    let angle = rng.gen_range(0.0..TAU);
    let distance = rng.gen_range(settings.wander_min_dist..=settings.wander_max_dist);

    let candidate = Vec3::new(
        origin.x + angle.cos() * distance,
        settings.ground_level,
        origin.z + angle.sin() * distance,
    );

    constrain_destination(candidate, &settings.boundary)
}

/// Applies boundary projection, then the protected-zone standoff.
///
/// Config validation guarantees the zone plus margin fits inside the
/// boundary and that the margin is positive, so a pushed destination stays
/// in bounds and strictly outside the zone.
pub fn constrain_destination(candidate: Vec3, boundary: &BoundaryConfig) -> Vec3 {
    let destination = clamp_by_projection(candidate, boundary.boundary_radius);

    let center = boundary.protected_zone_center;
    let radius = boundary.protected_zone_radius;
    if radius <= 0.0 || horizontal_distance(destination, center) >= radius {
        return destination;
    }

    // Dead center has no outward direction; any fixed one will do
    let away = horizontal_direction(center, destination).unwrap_or(Vec3::X);
    let standoff = radius + boundary.protected_zone_margin;
    Vec3::new(
        center.x + away.x * standoff,
        destination.y,
        center.z + away.z * standoff,
    )
}
