//! Hostile agent AI: Wander/Pursue state machine with hysteresis.
//!
//! The controller is plain Rust (no ECS queries) so it can be ticked by the
//! session in a fixed order with the lifecycle. The plugin only registers
//! the events and the visual-ready hook.

use bevy::prelude::*;

pub mod controller;
pub mod events;
pub mod systems;
pub mod wander;

#[cfg(test)]
mod controller_tests;

// Re-export core types
pub use controller::{Agent, AgentController, AgentDependencies, AgentState, TickOutcome};
pub use events::{AgentVisualLoaded, PursuitStateChanged};
pub use systems::{spawn_agent, PursuitAgent};
pub use wander::{constrain_destination, sample_wander_destination};

/// AI Plugin
///
/// `AgentVisualLoaded` is consumed in `Update` so the agent wakes up on the
/// frame the host reports it, whether or not a fixed step runs that frame.
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PursuitStateChanged>()
            .add_event::<AgentVisualLoaded>()
            .add_systems(Update, systems::apply_agent_visual_loaded);
    }
}
