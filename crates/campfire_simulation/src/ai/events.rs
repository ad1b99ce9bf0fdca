//! AI events exposed to collaborators.

use bevy::prelude::*;

/// Agent entered (`true`) or left (`false`) pursuit.
///
/// Fired once per transition, never while the state is steady.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PursuitStateChanged {
    pub is_pursuing: bool,
}

/// Host finished loading the agent's visual representation.
///
/// Until this arrives the agent is inert (no movement, stays Wandering).
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct AgentVisualLoaded;
