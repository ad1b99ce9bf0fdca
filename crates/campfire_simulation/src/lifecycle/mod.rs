//! Catch → death → timed respawn.

use bevy::prelude::*;

pub mod controller;
pub mod events;


pub use controller::{
    LifePhase, LifecycleController, LifecycleDependencies, LifecycleEvent, LifecycleState,
};
pub use events::{
    dispatch_effects, AgentCaughtPlayer, PlayerCollaborator, PlayerEffect, PlayerEffectRequested,
    PlayerRespawned,
};

pub struct LifecyclePlugin;

impl Plugin for LifecyclePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AgentCaughtPlayer>()
            .add_event::<PlayerRespawned>()
            .add_event::<PlayerEffectRequested>();
    }
}
