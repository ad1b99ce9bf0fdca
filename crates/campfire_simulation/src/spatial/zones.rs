//! Proximity zones around fixed props (campfire seats, signs).
//!
//! Each zone watches the player with its own [`ProximityMonitor`] and reports
//! only the enter/exit edges, so popups are not re-shown every frame.

use bevy::prelude::*;

use crate::player::Player;
use crate::spatial::{ProximityEdge, ProximityMonitor};

#[derive(Component, Debug, Clone)]
pub struct ProximityZone {
    pub label: String,
    pub monitor: ProximityMonitor,
}

impl ProximityZone {
    pub fn new(label: impl Into<String>, radius: f32) -> Self {
        Self {
            label: label.into(),
            monitor: ProximityMonitor::new(radius),
        }
    }
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct ProximityChanged {
    pub zone: Entity,
    pub label: String,
    pub near: bool,
}

pub fn spawn_proximity_zone(
    commands: &mut Commands,
    label: impl Into<String>,
    position: Vec3,
    radius: f32,
) -> Entity {
    commands
        .spawn((
            ProximityZone::new(label, radius),
            Transform::from_translation(position),
        ))
        .id()
}

/// System: player ↔ zone distance, edges only.
pub fn update_proximity_zones(
    players: Query<&Transform, With<Player>>,
    mut zones: Query<(Entity, &Transform, &mut ProximityZone), Without<Player>>,
    mut zone_events: EventWriter<ProximityChanged>,
) {
    let Ok(player) = players.single() else {
        return;
    };

    for (entity, transform, mut zone) in zones.iter_mut() {
        let Some(edge) = zone.monitor.update(transform.translation, player.translation) else {
            continue;
        };
        zone_events.write(ProximityChanged {
            zone: entity,
            label: zone.label.clone(),
            near: edge == ProximityEdge::Entered,
        });
    }
}
