//! Configuration bundle for the pursuit core.
//!
//! [`PursuitConfig`] is the flat bundle a host hands over (JSON keys are
//! camelCase). Controllers never read it directly: they take the validated
//! views produced by [`PursuitConfig::agent_settings`],
//! [`PursuitConfig::boundary`] and [`PursuitConfig::lifecycle_settings`].

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, LoadError};
use crate::spatial::horizontal_length;

/// Host-facing configuration bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(rename_all = "camelCase", default)]
pub struct PursuitConfig {
    /// Wander speed (m/s)
    pub base_speed: f32,
    /// Pursuit speed (m/s)
    pub chase_speed: f32,
    /// Entering pursuit: player closer than this (m)
    pub detection_radius: f32,
    /// Leaving pursuit: player farther than `detection_radius * chase_exit_multiplier`
    pub chase_exit_multiplier: f32,
    pub wander_interval_ms: f32,
    pub wander_min_dist: f32,
    pub wander_max_dist: f32,
    pub boundary_radius: f32,
    #[serde(with = "vec3_array")]
    pub protected_zone_center: Vec3,
    pub protected_zone_radius: f32,
    pub catch_distance: f32,
    pub respawn_delay_ms: f32,
    #[serde(with = "vec3_array")]
    pub respawn_point: Vec3,

    /// Where the agent is put back on respawn
    #[serde(with = "vec3_array")]
    pub agent_spawn_point: Vec3,
    /// Wander destination counts as reached below this distance
    pub arrival_epsilon: f32,
    /// Extra standoff added when a destination is pushed out of the protected zone
    pub protected_zone_margin: f32,
    pub ground_level: f32,
    /// Rollback radius for player-driven movement
    pub player_boundary_radius: f32,
    pub player_speed: f32,
    pub stamina: StaminaConfig,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            base_speed: 1.5,
            chase_speed: 3.0,
            detection_radius: 8.0,
            chase_exit_multiplier: 1.5,
            wander_interval_ms: 5000.0,
            wander_min_dist: 5.0,
            wander_max_dist: 20.0,
            boundary_radius: 26.0,
            protected_zone_center: Vec3::new(0.0, 0.0, -6.0),
            protected_zone_radius: 10.0,
            catch_distance: 1.5,
            respawn_delay_ms: 3000.0,
            respawn_point: Vec3::new(4.0, 0.0, 5.0),
            agent_spawn_point: Vec3::new(0.0, 0.0, -5.0),
            arrival_epsilon: 0.5,
            protected_zone_margin: 0.5,
            ground_level: 0.0,
            player_boundary_radius: 25.0,
            player_speed: 4.0,
            stamina: StaminaConfig::default(),
        }
    }
}

/// Sprint stamina tuning (player collaborator).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaminaConfig {
    pub max_stamina: f32,
    /// Units per second while sprinting and moving
    pub drain_rate: f32,
    /// Units per second while not sprinting
    pub recover_rate: f32,
    pub sprint_multiplier: f32,
    /// Sprint unlocks again above this fraction of max after exhaustion
    pub reenable_fraction: f32,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            max_stamina: 100.0,
            drain_rate: 10.0,
            recover_rate: 5.0,
            sprint_multiplier: 2.5,
            reenable_fraction: 0.2,
        }
    }
}

/// World containment and the zone wander destinations avoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryConfig {
    pub boundary_radius: f32,
    pub protected_zone_center: Vec3,
    pub protected_zone_radius: f32,
    pub protected_zone_margin: f32,
}

/// Validated agent parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSettings {
    pub base_speed: f32,
    pub chase_speed: f32,
    pub detection_radius: f32,
    pub chase_exit_multiplier: f32,
    pub wander_interval_ms: f32,
    pub wander_min_dist: f32,
    pub wander_max_dist: f32,
    pub arrival_epsilon: f32,
    pub ground_level: f32,
    pub spawn_point: Vec3,
    pub boundary: BoundaryConfig,
}

impl AgentSettings {
    pub fn exit_radius(&self) -> f32 {
        self.detection_radius * self.chase_exit_multiplier
    }
}

/// Validated catch/respawn parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifecycleSettings {
    pub catch_distance: f32,
    pub respawn_delay_ms: f32,
    pub respawn_point: Vec3,
    pub agent_spawn_point: Vec3,
}

impl PursuitConfig {
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("baseSpeed", self.base_speed),
            ("chaseSpeed", self.chase_speed),
            ("detectionRadius", self.detection_radius),
            ("chaseExitMultiplier", self.chase_exit_multiplier),
            ("wanderIntervalMs", self.wander_interval_ms),
            ("wanderMinDist", self.wander_min_dist),
            ("wanderMaxDist", self.wander_max_dist),
            ("boundaryRadius", self.boundary_radius),
            ("protectedZoneRadius", self.protected_zone_radius),
            ("catchDistance", self.catch_distance),
            ("respawnDelayMs", self.respawn_delay_ms),
            ("arrivalEpsilon", self.arrival_epsilon),
            ("protectedZoneMargin", self.protected_zone_margin),
            ("groundLevel", self.ground_level),
            ("playerBoundaryRadius", self.player_boundary_radius),
            ("playerSpeed", self.player_speed),
            ("stamina.maxStamina", self.stamina.max_stamina),
            ("stamina.drainRate", self.stamina.drain_rate),
            ("stamina.recoverRate", self.stamina.recover_rate),
            ("stamina.sprintMultiplier", self.stamina.sprint_multiplier),
            ("stamina.reenableFraction", self.stamina.reenable_fraction),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        let points = [
            ("protectedZoneCenter", self.protected_zone_center),
            ("respawnPoint", self.respawn_point),
            ("agentSpawnPoint", self.agent_spawn_point),
        ];
        for (field, point) in points {
            if !point.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        let positive = [
            ("baseSpeed", self.base_speed),
            ("chaseSpeed", self.chase_speed),
            ("detectionRadius", self.detection_radius),
            ("wanderIntervalMs", self.wander_interval_ms),
            ("wanderMaxDist", self.wander_max_dist),
            ("boundaryRadius", self.boundary_radius),
            ("catchDistance", self.catch_distance),
            ("arrivalEpsilon", self.arrival_epsilon),
            ("playerBoundaryRadius", self.player_boundary_radius),
            ("playerSpeed", self.player_speed),
            ("stamina.maxStamina", self.stamina.max_stamina),
            ("stamina.sprintMultiplier", self.stamina.sprint_multiplier),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let non_negative = [
            ("wanderMinDist", self.wander_min_dist),
            ("protectedZoneRadius", self.protected_zone_radius),
            ("respawnDelayMs", self.respawn_delay_ms),
            ("protectedZoneMargin", self.protected_zone_margin),
            ("stamina.drainRate", self.stamina.drain_rate),
            ("stamina.recoverRate", self.stamina.recover_rate),
            ("stamina.reenableFraction", self.stamina.reenable_fraction),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.chase_exit_multiplier <= 1.0 {
            return Err(ConfigError::ChaseExitMultiplier(self.chase_exit_multiplier));
        }

        if self.wander_min_dist > self.wander_max_dist {
            return Err(ConfigError::WanderRange {
                min: self.wander_min_dist,
                max: self.wander_max_dist,
            });
        }

        if self.protected_zone_radius > 0.0 {
            // A pushed destination must land strictly outside the zone
            if self.protected_zone_margin <= 0.0 {
                return Err(ConfigError::NonPositive {
                    field: "protectedZoneMargin",
                    value: self.protected_zone_margin,
                });
            }
            let reach = horizontal_length(self.protected_zone_center)
                + self.protected_zone_radius
                + self.protected_zone_margin;
            if reach > self.boundary_radius {
                return Err(ConfigError::ProtectedZoneOutsideBoundary {
                    reach,
                    boundary: self.boundary_radius,
                });
            }
        }

        let spawn_distance = horizontal_length(self.agent_spawn_point);
        if spawn_distance > self.boundary_radius {
            return Err(ConfigError::PointOutsideBoundary {
                field: "agentSpawnPoint",
                distance: spawn_distance,
                boundary: self.boundary_radius,
            });
        }

        let respawn_distance = horizontal_length(self.respawn_point);
        if respawn_distance > self.player_boundary_radius {
            return Err(ConfigError::PointOutsideBoundary {
                field: "respawnPoint",
                distance: respawn_distance,
                boundary: self.player_boundary_radius,
            });
        }

        Ok(())
    }

    pub fn boundary(&self) -> BoundaryConfig {
        BoundaryConfig {
            boundary_radius: self.boundary_radius,
            protected_zone_center: self.protected_zone_center,
            protected_zone_radius: self.protected_zone_radius,
            protected_zone_margin: self.protected_zone_margin,
        }
    }

    pub fn agent_settings(&self) -> AgentSettings {
        AgentSettings {
            base_speed: self.base_speed,
            chase_speed: self.chase_speed,
            detection_radius: self.detection_radius,
            chase_exit_multiplier: self.chase_exit_multiplier,
            wander_interval_ms: self.wander_interval_ms,
            wander_min_dist: self.wander_min_dist,
            wander_max_dist: self.wander_max_dist,
            arrival_epsilon: self.arrival_epsilon,
            ground_level: self.ground_level,
            spawn_point: self.agent_spawn_point,
            boundary: self.boundary(),
        }
    }

    pub fn lifecycle_settings(&self) -> LifecycleSettings {
        LifecycleSettings {
            catch_distance: self.catch_distance,
            respawn_delay_ms: self.respawn_delay_ms,
            respawn_point: self.respawn_point,
            agent_spawn_point: self.agent_spawn_point,
        }
    }
}

/// `Vec3` as a `[x, y, z]` array on the wire.
mod vec3_array {
    use bevy::prelude::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
        value.to_array().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        <[f32; 3]>::deserialize(deserializer).map(Vec3::from_array)
    }
}
