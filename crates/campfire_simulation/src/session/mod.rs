//! Pursuit session: the per-frame driver.
//!
//! Owns the agent and lifecycle controllers and ticks them in a fixed order
//! (detection → movement → clamp → catch check), so the lifecycle always sees
//! the agent's post-clamp position of the same frame.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ai::{AgentController, AgentDependencies, PursuitStateChanged, TickOutcome};
use crate::config::PursuitConfig;
use crate::error::ConfigError;
use crate::lifecycle::{
    dispatch_effects, AgentCaughtPlayer, LifecycleController, LifecycleDependencies,
    LifecycleEvent, PlayerCollaborator, PlayerEffect, PlayerRespawned,
};
use crate::logger;
use crate::player::PlayerHandle;

pub mod stats;
pub mod systems;


pub use stats::PursuitStats;

/// Everything the core reports for one tick, in emission order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimulationEvent {
    PursuitStateChanged(PursuitStateChanged),
    AgentCaughtPlayer(AgentCaughtPlayer),
    PlayerRespawned(PlayerRespawned),
}

impl From<LifecycleEvent> for SimulationEvent {
    fn from(event: LifecycleEvent) -> Self {
        match event {
            LifecycleEvent::Caught(caught) => Self::AgentCaughtPlayer(caught),
            LifecycleEvent::Respawned(respawned) => Self::PlayerRespawned(respawned),
        }
    }
}

/// Outcomes of the last tick, agent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub agent: TickOutcome,
    pub lifecycle: TickOutcome,
}

#[derive(Resource)]
pub struct PursuitSession {
    config: PursuitConfig,
    seed: u64,
    player: Option<PlayerHandle>,
    agent: AgentController,
    lifecycle: LifecycleController,
    clock_ms: f64,
    ticks: u64,
    last_report: Option<TickReport>,
    effects: Vec<PlayerEffect>,
}

impl PursuitSession {
    /// Validates `config` and builds both controllers, not yet attached to a player.
    pub fn new(config: PursuitConfig, seed: u64) -> Result<Self, ConfigError> {
        let agent = AgentController::new(&config, ChaCha8Rng::seed_from_u64(seed))?;
        let lifecycle = LifecycleController::new(&config)?;

        logger::log_info(&format!("Session: created (seed={})", seed));
        Ok(Self {
            config,
            seed,
            player: None,
            agent,
            lifecycle,
            clock_ms: 0.0,
            ticks: 0,
            last_report: None,
            effects: Vec::new(),
        })
    }

    /// Wires the same player handle into both controllers.
    pub fn attach_player(&mut self, player: PlayerHandle) {
        self.agent.attach(AgentDependencies {
            player: player.clone(),
        });
        self.lifecycle.attach(LifecycleDependencies {
            player: player.clone(),
        });
        logger::log_info(&format!(
            "Session: player attached at {:?}",
            player.position()
        ));
        self.player = Some(player);
    }

    pub fn set_agent_visual_ready(&mut self, ready: bool) {
        self.agent.set_visual_ready(ready);
    }

    pub fn player(&self) -> Option<&PlayerHandle> {
        self.player.as_ref()
    }

    pub fn agent(&self) -> &AgentController {
        &self.agent
    }

    pub fn lifecycle(&self) -> &LifecycleController {
        &self.lifecycle
    }

    pub fn config(&self) -> &PursuitConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Accumulated session time (ms).
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn last_report(&self) -> Option<TickReport> {
        self.last_report
    }

    /// One frame. Returns the events it produced.
    pub fn tick(&mut self, delta_ms: f32) -> Vec<SimulationEvent> {
        let delta_ms = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };
        self.clock_ms += f64::from(delta_ms);
        self.ticks += 1;

        let agent = self.agent.tick(delta_ms);
        let mut events: Vec<SimulationEvent> = self
            .agent
            .drain_events()
            .into_iter()
            .map(SimulationEvent::PursuitStateChanged)
            .collect();

        let lifecycle = self.lifecycle.tick(delta_ms, &mut self.agent);
        events.extend(self.lifecycle.drain_events().into_iter().map(SimulationEvent::from));
        // Respawn resets the agent, which may end a chase
        events.extend(
            self.agent
                .drain_events()
                .into_iter()
                .map(SimulationEvent::PursuitStateChanged),
        );
        self.effects.extend(self.lifecycle.drain_effects());

        self.last_report = Some(TickReport { agent, lifecycle });
        events
    }

    /// Player-effect requests queued since the last call.
    pub fn effects(&mut self) -> Vec<PlayerEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Drains queued effects into `collaborator`.
    pub fn dispatch_effects<C: PlayerCollaborator + ?Sized>(&mut self, collaborator: &mut C) {
        dispatch_effects(self.effects(), collaborator);
    }
}
