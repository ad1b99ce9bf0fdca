//! Wander/Pursue state machine for the hostile agent.
//!
//! Per tick, in order:
//! 1. detection with hysteresis (enter below `detection_radius`, leave above
//!    `detection_radius * chase_exit_multiplier`)
//! 2. wander re-selection (interval elapsed or destination reached)
//! 3. movement integration toward the player or the destination
//! 4. clamp-by-projection onto the world boundary

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::ai::events::PursuitStateChanged;
use crate::ai::wander::sample_wander_destination;
use crate::config::{AgentSettings, PursuitConfig};
use crate::error::{ConfigError, MissingReference};
use crate::logger::{self, LogOnce};
use crate::player::PlayerHandle;
use crate::spatial::{
    clamp_by_projection, horizontal_direction, horizontal_distance, ProximityMonitor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum AgentState {
    #[default]
    Wandering,
    Pursuing,
}

/// Agent kinematic state.
///
/// Invariant: after every tick, `position` is within the boundary radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agent {
    pub position: Vec3,
    pub destination: Vec3,
    pub state: AgentState,
    pub wander_elapsed_ms: f32,
    /// Yaw (radians) of the last movement, for the visual
    pub heading: f32,
}

/// Result of one `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced,
    /// Skipped: a collaborator is not available yet
    Inert(MissingReference),
}

/// Collaborators resolved after construction.
#[derive(Debug, Clone)]
pub struct AgentDependencies {
    pub player: PlayerHandle,
}

pub struct AgentController {
    settings: AgentSettings,
    agent: Agent,
    detector: ProximityMonitor,
    rng: ChaCha8Rng,
    player: Option<PlayerHandle>,
    visual_ready: bool,
    missing_player: LogOnce,
    missing_visual: LogOnce,
    events: Vec<PursuitStateChanged>,
}

impl AgentController {
    /// Builds the agent at its spawn point, Wandering, with a fresh destination.
    pub fn new(config: &PursuitConfig, rng: ChaCha8Rng) -> Result<Self, ConfigError> {
        config.validate()?;
        let settings = config.agent_settings();

        let spawn = Vec3::new(
            settings.spawn_point.x,
            settings.ground_level,
            settings.spawn_point.z,
        );
        let mut controller = Self {
            settings,
            agent: Agent {
                position: spawn,
                destination: spawn,
                state: AgentState::Wandering,
                wander_elapsed_ms: 0.0,
                heading: 0.0,
            },
            detector: ProximityMonitor::with_hysteresis(
                settings.detection_radius,
                settings.exit_radius(),
            ),
            rng,
            player: None,
            visual_ready: false,
            missing_player: LogOnce::default(),
            missing_visual: LogOnce::default(),
            events: Vec::new(),
        };
        controller.set_random_destination();
        Ok(controller)
    }

    /// Second phase: wire collaborators once the host has them.
    pub fn attach(&mut self, dependencies: AgentDependencies) {
        self.player = Some(dependencies.player);
        self.missing_player.rearm();
    }

    /// Drops the player handle. A chase in progress ends immediately.
    pub fn detach(&mut self) {
        self.player = None;
        self.drop_pursuit("player detached");
    }

    pub fn set_visual_ready(&mut self, ready: bool) {
        if ready && !self.visual_ready {
            logger::log_info("Agent: visual loaded, agent active");
            self.missing_visual.rearm();
        }
        if !ready {
            self.drop_pursuit("visual unloaded");
        }
        self.visual_ready = ready;
    }

    pub fn is_visual_ready(&self) -> bool {
        self.visual_ready
    }

    pub fn is_attached(&self) -> bool {
        self.player.is_some()
    }

    pub fn is_pursuing(&self) -> bool {
        self.agent.state == AgentState::Pursuing
    }

    pub fn state(&self) -> AgentState {
        self.agent.state
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn position(&self) -> Vec3 {
        self.agent.position
    }

    pub fn destination(&self) -> Vec3 {
        self.agent.destination
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    /// Pursuit transitions since the last drain.
    pub fn drain_events(&mut self) -> Vec<PursuitStateChanged> {
        std::mem::take(&mut self.events)
    }

    /// Picks a new wander target around the current position.
    pub fn set_random_destination(&mut self) {
        self.agent.destination =
            sample_wander_destination(self.agent.position, &self.settings, &mut self.rng);
        self.agent.wander_elapsed_ms = 0.0;
    }

    /// Advances one frame. No-op while the player or the visual is missing.
    pub fn tick(&mut self, delta_ms: f32) -> TickOutcome {
        let Some(player_position) = self.player.as_ref().map(PlayerHandle::position) else {
            self.missing_player
                .warn("Agent: no player handle attached, agent inert");
            self.drop_pursuit("player missing");
            return TickOutcome::Inert(MissingReference::Player);
        };
        if !self.visual_ready {
            self.missing_visual
                .warn("Agent: visual not loaded yet, agent inert");
            self.drop_pursuit("visual missing");
            return TickOutcome::Inert(MissingReference::AgentVisual);
        }

        let delta_ms = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };

        self.update_detection(player_position);

        if self.agent.state == AgentState::Wandering {
            self.agent.wander_elapsed_ms += delta_ms;
            let arrived = horizontal_distance(self.agent.position, self.agent.destination)
                < self.settings.arrival_epsilon;
            if arrived || self.agent.wander_elapsed_ms > self.settings.wander_interval_ms {
                self.set_random_destination();
            }
        }

        self.integrate(player_position, delta_ms / 1000.0);

        self.agent.position =
            clamp_by_projection(self.agent.position, self.settings.boundary.boundary_radius);

        TickOutcome::Advanced
    }

    /// Puts the agent back at `spawn_point`, Wandering, with a new destination.
    ///
    /// Used on player respawn so a chase never carries over.
    pub fn force_reset(&mut self, spawn_point: Vec3) {
        let was_pursuing = self.is_pursuing();

        let spawn = Vec3::new(spawn_point.x, self.settings.ground_level, spawn_point.z);
        self.agent.position = clamp_by_projection(spawn, self.settings.boundary.boundary_radius);
        self.agent.state = AgentState::Wandering;
        self.detector.reset(false);
        self.set_random_destination();

        if was_pursuing {
            self.events.push(PursuitStateChanged { is_pursuing: false });
        }
        logger::log(&format!(
            "Agent: reset to {:?}, wandering toward {:?}",
            self.agent.position, self.agent.destination
        ));
    }

    /// An inert agent never stays Pursuing: back to Wandering with a fresh
    /// detector, emitting the falling edge if a chase was running.
    fn drop_pursuit(&mut self, reason: &str) {
        if !self.is_pursuing() {
            return;
        }
        self.agent.state = AgentState::Wandering;
        self.detector.reset(false);
        self.events.push(PursuitStateChanged { is_pursuing: false });
        logger::log_info(&format!("Agent: Pursuing → Wandering ({reason})"));
    }

    fn update_detection(&mut self, player_position: Vec3) {
        let distance = horizontal_distance(self.agent.position, player_position);
        let Some(edge) = self.detector.observe_distance(distance) else {
            return;
        };

        let is_pursuing = edge.is_near();
        self.agent.state = if is_pursuing {
            AgentState::Pursuing
        } else {
            AgentState::Wandering
        };
        self.events.push(PursuitStateChanged { is_pursuing });

        if is_pursuing {
            logger::log_info(&format!(
                "Agent: Wandering → Pursuing (player at {:.2}m)",
                distance
            ));
        } else {
            logger::log_info(&format!(
                "Agent: Pursuing → Wandering (player escaped to {:.2}m)",
                distance
            ));
        }
    }

    fn integrate(&mut self, player_position: Vec3, delta_secs: f32) {
        let (target, speed) = match self.agent.state {
            AgentState::Pursuing => (player_position, self.settings.chase_speed),
            AgentState::Wandering => (self.agent.destination, self.settings.base_speed),
        };

        let Some(direction) = horizontal_direction(self.agent.position, target) else {
            // Already on target: wander picks a new one, pursuit just waits a frame
            if self.agent.state == AgentState::Wandering {
                self.set_random_destination();
            }
            return;
        };

        let remaining = horizontal_distance(self.agent.position, target);
        let step = (speed * delta_secs).min(remaining);
        let mut next = self.agent.position + direction * step;
        next.y = self.settings.ground_level;

        self.agent.position = next;
        self.agent.heading = direction.x.atan2(direction.z);
    }
}
