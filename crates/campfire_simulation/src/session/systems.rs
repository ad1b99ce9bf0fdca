//! Session systems: creation, player attachment, the fixed-step tick.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::PursuitStateChanged;
use crate::config::PursuitConfig;
use crate::lifecycle::{AgentCaughtPlayer, PlayerEffectRequested, PlayerRespawned};
use crate::logger;
use crate::player::{Player, PlayerHandle};
use crate::session::{PursuitSession, PursuitStats, SimulationEvent};
use crate::DeterministicRng;

/// Startup: builds the session from the config resource.
///
/// An invalid config is logged and leaves the world without a session; every
/// pursuit system then skips, the rest of the app keeps running.
pub fn init_pursuit_session(
    mut commands: Commands,
    config: Res<PursuitConfig>,
    rng: Option<ResMut<DeterministicRng>>,
) {
    // The agent gets its own stream, drawn from the world RNG
    let seed = rng.map(|mut rng| rng.rng.gen::<u64>()).unwrap_or_default();

    match PursuitSession::new(config.clone(), seed) {
        Ok(session) => commands.insert_resource(session),
        Err(error) => {
            logger::log_error(&format!("Session: invalid configuration, pursuit disabled: {}", error));
        }
    }
}

/// Hands a freshly spawned player to the session.
pub fn attach_spawned_player(
    session: Option<ResMut<PursuitSession>>,
    players: Query<&Transform, Added<Player>>,
) {
    let Some(mut session) = session else {
        return;
    };
    for transform in players.iter() {
        if session.player().is_some() {
            logger::log_warning("Session: second player spawned, ignored");
            continue;
        }
        session.attach_player(PlayerHandle::new(transform.translation));
    }
}

/// System: one session tick per fixed step, events forwarded to the ECS.
pub fn tick_pursuit_session(
    time: Res<Time<Fixed>>,
    session: Option<ResMut<PursuitSession>>,
    mut stats: ResMut<PursuitStats>,
    mut pursuit_events: EventWriter<PursuitStateChanged>,
    mut caught_events: EventWriter<AgentCaughtPlayer>,
    mut respawn_events: EventWriter<PlayerRespawned>,
    mut effect_events: EventWriter<PlayerEffectRequested>,
) {
    let Some(mut session) = session else {
        return;
    };

    let delta_ms = time.delta_secs() * 1000.0;
    for event in session.tick(delta_ms) {
        stats.record(&event);
        match event {
            SimulationEvent::PursuitStateChanged(changed) => {
                pursuit_events.write(changed);
            }
            SimulationEvent::AgentCaughtPlayer(caught) => {
                caught_events.write(caught);
            }
            SimulationEvent::PlayerRespawned(respawned) => {
                respawn_events.write(respawned);
            }
        }
    }

    for effect in session.effects() {
        effect_events.write(PlayerEffectRequested(effect));
    }
}
