//! AI host hooks: agent entity, visual readiness, transform sync.

use bevy::prelude::*;

use crate::ai::AgentVisualLoaded;
use crate::config::PursuitConfig;
use crate::session::PursuitSession;

/// Marker for the entity that mirrors the pursuit agent.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PursuitAgent;

pub fn spawn_agent(commands: &mut Commands, config: &PursuitConfig) -> Entity {
    commands
        .spawn((
            PursuitAgent,
            Transform::from_translation(config.agent_spawn_point),
        ))
        .id()
}

/// System: host finished loading the agent visual → agent becomes active.
pub fn apply_agent_visual_loaded(
    mut loaded: EventReader<AgentVisualLoaded>,
    session: Option<ResMut<PursuitSession>>,
) {
    if loaded.is_empty() {
        return;
    }
    loaded.clear();

    let Some(mut session) = session else {
        return;
    };
    session.set_agent_visual_ready(true);
}

/// System: agent position + heading → `Transform`.
pub fn sync_agent_transform(
    session: Option<Res<PursuitSession>>,
    mut agents: Query<&mut Transform, With<PursuitAgent>>,
) {
    let Some(session) = session else {
        return;
    };
    let agent = session.agent().agent();

    for mut transform in agents.iter_mut() {
        transform.translation = agent.position;
        transform.rotation = Quat::from_rotation_y(agent.heading);
    }
}
