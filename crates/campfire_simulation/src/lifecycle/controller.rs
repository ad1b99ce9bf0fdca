//! Alive/Dead flow: catch detection, input freeze, countdown, respawn.
//!
//! Alive → Dead only when the agent is Pursuing *and* closer than
//! `catch_distance`; being merely close to a wandering agent is safe.
//! Dead → Alive once the accumulated dead time reaches `respawn_delay_ms`.

use bevy::prelude::*;

use crate::ai::AgentController;
use crate::ai::TickOutcome;
use crate::config::{LifecycleSettings, PursuitConfig};
use crate::error::{ConfigError, MissingReference};
use crate::lifecycle::events::{AgentCaughtPlayer, PlayerEffect, PlayerRespawned};
use crate::logger::{self, LogOnce};
use crate::player::PlayerHandle;
use crate::spatial::horizontal_distance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum LifePhase {
    #[default]
    Alive,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifecycleState {
    pub phase: LifePhase,
    pub death_elapsed_ms: f32,
    pub respawn_delay_ms: f32,
    pub respawn_point: Vec3,
    pub catch_distance: f32,
    /// Session clock at the most recent death
    pub died_at_ms: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LifecycleEvent {
    Caught(AgentCaughtPlayer),
    Respawned(PlayerRespawned),
}

#[derive(Debug, Clone)]
pub struct LifecycleDependencies {
    pub player: PlayerHandle,
}

pub struct LifecycleController {
    settings: LifecycleSettings,
    state: LifecycleState,
    player: Option<PlayerHandle>,
    clock_ms: f64,
    last_countdown: Option<u32>,
    missing_player: LogOnce,
    events: Vec<LifecycleEvent>,
    effects: Vec<PlayerEffect>,
}

impl LifecycleController {
    pub fn new(config: &PursuitConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let settings = config.lifecycle_settings();

        Ok(Self {
            settings,
            state: LifecycleState {
                phase: LifePhase::Alive,
                death_elapsed_ms: 0.0,
                respawn_delay_ms: settings.respawn_delay_ms,
                respawn_point: settings.respawn_point,
                catch_distance: settings.catch_distance,
                died_at_ms: None,
            },
            player: None,
            clock_ms: 0.0,
            last_countdown: None,
            missing_player: LogOnce::default(),
            events: Vec::new(),
            effects: Vec::new(),
        })
    }

    pub fn attach(&mut self, dependencies: LifecycleDependencies) {
        self.player = Some(dependencies.player);
        self.missing_player.rearm();
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub fn phase(&self) -> LifePhase {
        self.state.phase
    }

    pub fn is_dead(&self) -> bool {
        self.state.phase == LifePhase::Dead
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Whole seconds until respawn while Dead, rounded up.
    pub fn countdown_seconds(&self) -> Option<u32> {
        if !self.is_dead() {
            return None;
        }
        let remaining_ms = self.state.respawn_delay_ms - self.state.death_elapsed_ms;
        Some((remaining_ms / 1000.0).ceil().max(0.0) as u32)
    }

    pub fn drain_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn drain_effects(&mut self) -> Vec<PlayerEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Runs after the agent's tick so the catch check sees the clamped position.
    pub fn tick(&mut self, delta_ms: f32, agent: &mut AgentController) -> TickOutcome {
        let Some(player) = self.player.clone() else {
            self.missing_player
                .warn("Lifecycle: no player handle attached, catch checks skipped");
            return TickOutcome::Inert(MissingReference::Player);
        };

        let delta_ms = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };
        self.clock_ms += f64::from(delta_ms);

        match self.state.phase {
            LifePhase::Alive => {
                let player_position = player.position();
                let distance = horizontal_distance(player_position, agent.position());
                if distance < self.state.catch_distance && agent.is_pursuing() {
                    self.die(&player, player_position, agent.position());
                }
            }
            LifePhase::Dead => {
                self.state.death_elapsed_ms += delta_ms;
                self.publish_countdown();
                if self.state.death_elapsed_ms >= self.state.respawn_delay_ms {
                    self.respawn(&player, agent);
                }
            }
        }

        TickOutcome::Advanced
    }

    fn die(&mut self, player: &PlayerHandle, player_position: Vec3, agent_position: Vec3) {
        self.state.phase = LifePhase::Dead;
        self.state.death_elapsed_ms = 0.0;
        self.state.died_at_ms = Some(self.clock_ms);
        player.set_alive(false);

        self.effects.extend([
            PlayerEffect::SetInputEnabled(false),
            PlayerEffect::SetLightEnabled(false),
            PlayerEffect::SetDeathOverlayVisible(true),
        ]);
        self.last_countdown = None;
        self.publish_countdown();

        self.events.push(LifecycleEvent::Caught(AgentCaughtPlayer {
            player_position,
            agent_position,
            at_ms: self.clock_ms,
        }));
        logger::log_info(&format!(
            "Lifecycle: player caught at {:?} (t={:.0}ms), respawn in {}ms",
            player_position, self.clock_ms, self.state.respawn_delay_ms
        ));
    }

    fn respawn(&mut self, player: &PlayerHandle, agent: &mut AgentController) {
        self.state.phase = LifePhase::Alive;
        self.state.death_elapsed_ms = 0.0;
        self.last_countdown = None;

        player.teleport(self.state.respawn_point);
        player.set_alive(true);

        self.effects.extend([
            PlayerEffect::SetInputEnabled(true),
            PlayerEffect::SetLightEnabled(true),
            PlayerEffect::SetDeathOverlayVisible(false),
        ]);

        // A chase must not survive the respawn
        agent.force_reset(self.settings.agent_spawn_point);

        self.events.push(LifecycleEvent::Respawned(PlayerRespawned {
            position: self.state.respawn_point,
        }));
        logger::log_info(&format!(
            "Lifecycle: player respawned at {:?}",
            self.state.respawn_point
        ));
    }

    fn publish_countdown(&mut self) {
        let Some(remaining) = self.countdown_seconds() else {
            return;
        };
        if self.last_countdown != Some(remaining) {
            self.last_countdown = Some(remaining);
            self.effects.push(PlayerEffect::UpdateCountdown(remaining));
        }
    }
}
