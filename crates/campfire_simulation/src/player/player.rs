//! Player ECS components.

use bevy::prelude::*;

/// Marker component for the player-controlled entity
///
/// Movement systems use `With<Player>`; the pursuit agent is never tagged.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Movement/look input gates, closed by the lifecycle while dead.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerControls {
    pub movement_enabled: bool,
    pub look_enabled: bool,
}

impl Default for PlayerControls {
    fn default() -> Self {
        Self {
            movement_enabled: true,
            look_enabled: true,
        }
    }
}

impl PlayerControls {
    pub fn set_enabled(&mut self, enabled: bool) {
        self.movement_enabled = enabled;
        self.look_enabled = enabled;
    }
}

/// Desired movement for this frame, filled by the input layer (or a script in headless runs).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerIntent {
    /// Horizontal direction, any length (normalized on use)
    pub direction: Vec3,
    /// Sprint key held
    pub sprint: bool,
    /// Flashlight key pressed this frame
    pub toggle_flashlight: bool,
}

/// Player-held light.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Flashlight {
    pub on: bool,
    pub on_intensity: f32,
    pub off_intensity: f32,
}

impl Default for Flashlight {
    fn default() -> Self {
        Self {
            on: true,
            on_intensity: 3.0,
            off_intensity: 0.0,
        }
    }
}

impl Flashlight {
    /// Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.on = !self.on;
        self.on
    }

    /// Returns true if the state changed.
    pub fn set_on(&mut self, on: bool) -> bool {
        let changed = self.on != on;
        self.on = on;
        changed
    }

    pub fn intensity(&self) -> f32 {
        if self.on {
            self.on_intensity
        } else {
            self.off_intensity
        }
    }
}
