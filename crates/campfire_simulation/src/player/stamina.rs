//! Sprint stamina for the player.
//!
//! Drain while sprinting and moving, recover otherwise. Running dry locks
//! sprint until stamina climbs back above `reenable_fraction` of max, so the
//! sprint key cannot flicker at empty.

use bevy::prelude::*;

use crate::config::StaminaConfig;

/// Sprint start/stop, reported once per change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SprintEdge {
    Started,
    Stopped,
}

/// Invariant: 0.0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SprintStamina {
    pub current: f32,
    pub max: f32,
    pub drain_rate: f32,
    pub recover_rate: f32,
    pub sprint_multiplier: f32,
    pub reenable_fraction: f32,
    sprinting: bool,
    can_sprint: bool,
}

impl Default for SprintStamina {
    fn default() -> Self {
        Self::new(StaminaConfig::default())
    }
}

impl SprintStamina {
    pub fn new(config: StaminaConfig) -> Self {
        Self {
            current: config.max_stamina,
            max: config.max_stamina,
            drain_rate: config.drain_rate,
            recover_rate: config.recover_rate,
            sprint_multiplier: config.sprint_multiplier,
            reenable_fraction: config.reenable_fraction,
            sprinting: false,
            can_sprint: true,
        }
    }

    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    pub fn can_sprint(&self) -> bool {
        self.can_sprint
    }

    pub fn fraction(&self) -> f32 {
        self.current / self.max
    }

    /// Speed multiplier to apply to movement this frame.
    pub fn speed_multiplier(&self) -> f32 {
        if self.sprinting {
            self.sprint_multiplier
        } else {
            1.0
        }
    }

    pub fn start_sprint(&mut self) -> Option<SprintEdge> {
        if !self.can_sprint || self.sprinting {
            return None;
        }
        self.sprinting = true;
        Some(SprintEdge::Started)
    }

    pub fn stop_sprint(&mut self) -> Option<SprintEdge> {
        if !self.sprinting {
            return None;
        }
        self.sprinting = false;
        Some(SprintEdge::Stopped)
    }

    /// Advances stamina; returns `Stopped` if exhaustion forced the sprint off.
    pub fn tick(&mut self, delta_ms: f32, is_moving: bool) -> Option<SprintEdge> {
        let delta_secs = delta_ms / 1000.0;
        let mut edge = None;

        if self.sprinting {
            if is_moving {
                self.current -= self.drain_rate * delta_secs;
            } else {
                // Holding sprint while standing still recovers at half rate
                self.current += self.recover_rate * delta_secs / 2.0;
            }

            if self.current <= 0.0 {
                self.current = 0.0;
                self.can_sprint = false;
                edge = self.stop_sprint();
            }
        } else if self.current < self.max {
            self.current += self.recover_rate * delta_secs;
            if self.current > self.max * self.reenable_fraction {
                self.can_sprint = true;
            }
        }

        self.current = self.current.clamp(0.0, self.max);
        edge
    }
}
