//! Campfire pursuit simulation core
//!
//! A hostile agent wanders a bounded clearing, chases the player with
//! hysteresis, and a lifecycle turns a catch into death and a timed respawn.
//!
//! The core is plain Rust driven by [`session::PursuitSession::tick`]; the
//! Bevy layer ([`PursuitPlugin`]) only feeds it fixed-step time and forwards
//! its events, so the same rules run headless, in tests, or under a host engine.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod ai;
pub mod config;
pub mod error;
pub mod hud;
pub mod lifecycle;
pub mod logger;
pub mod player;
pub mod session;
pub mod spatial;

pub use ai::{AIPlugin, AgentController, AgentState, PursuitAgent, PursuitStateChanged};
pub use config::PursuitConfig;
pub use error::{ConfigError, LoadError, MissingReference};
pub use hud::HudState;
pub use lifecycle::{
    AgentCaughtPlayer, LifePhase, LifecycleController, LifecyclePlugin, PlayerEffect,
    PlayerRespawned,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use player::{Player, PlayerHandle, PlayerIntent, PlayerPlugin};
pub use session::{PursuitSession, PursuitStats, SimulationEvent};

/// Pursuit plugin (all subsystems).
///
/// FixedUpdate order:
/// 1. player movement (rollback containment)
/// 2. sprint stamina
/// 3. session tick: agent, then lifecycle
/// 4. transform sync
/// 5. flashlight key + lifecycle effects on the player
/// 6. HUD
/// 7. proximity zones
#[derive(Default)]
pub struct PursuitPlugin {
    pub config: PursuitConfig,
}

impl Plugin for PursuitPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.insert_resource(self.config.clone())
            .init_resource::<PursuitStats>()
            .init_resource::<HudState>()
            .add_event::<spatial::ProximityChanged>()
            .add_plugins((AIPlugin, LifecyclePlugin, PlayerPlugin))
            .add_systems(Startup, session::systems::init_pursuit_session)
            .add_systems(Update, session::systems::attach_spawned_player)
            .add_systems(
                FixedUpdate,
                (
                    player::systems::move_player_from_intent,
                    player::systems::tick_sprint_stamina,
                    session::systems::tick_pursuit_session,
                    (
                        ai::systems::sync_agent_transform,
                        player::systems::sync_player_transform,
                    ),
                    (
                        player::systems::toggle_flashlight_from_intent,
                        player::systems::apply_player_effects,
                    )
                        .chain(),
                    hud::update_hud,
                    spatial::zones::update_proximity_zones,
                )
                    .chain(),
            );
    }
}

/// Deterministic RNG resource (seeded); the session draws its agent seed from `rng`.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Minimal headless Bevy App: time, 60 Hz fixed step, seeded RNG, console logger.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0));

    app
}

/// Headless app with the pursuit plugin installed.
pub fn create_pursuit_app(seed: u64, config: PursuitConfig) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(PursuitPlugin { config });
    app
}
