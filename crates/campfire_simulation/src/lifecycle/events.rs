//! Lifecycle events and the player-effect requests sent to collaborators.

use bevy::prelude::*;

/// Alive → Dead: the pursuing agent reached the player.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AgentCaughtPlayer {
    pub player_position: Vec3,
    pub agent_position: Vec3,
    /// Session clock at the catch (ms)
    pub at_ms: f64,
}

/// Dead → Alive: player teleported to the respawn point.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerRespawned {
    pub position: Vec3,
}

/// Something the lifecycle asks a player collaborator to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEffect {
    /// Movement + look input
    SetInputEnabled(bool),
    /// Player-held light
    SetLightEnabled(bool),
    SetDeathOverlayVisible(bool),
    /// Whole seconds left before respawn, sent only when the value changes
    UpdateCountdown(u32),
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerEffectRequested(pub PlayerEffect);

/// Receiver for [`PlayerEffect`] requests (input layer, HUD, light).
pub trait PlayerCollaborator {
    fn apply_effect(&mut self, effect: PlayerEffect);
}

/// Feeds every effect to `collaborator`, in order.
pub fn dispatch_effects<C: PlayerCollaborator + ?Sized>(
    effects: impl IntoIterator<Item = PlayerEffect>,
    collaborator: &mut C,
) {
    for effect in effects {
        collaborator.apply_effect(effect);
    }
}
