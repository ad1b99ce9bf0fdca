//! Session counters.

use bevy::prelude::*;

use crate::session::SimulationEvent;

/// Running totals for a session (headless summary, integration tests).
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PursuitStats {
    pub pursuits_started: u32,
    pub pursuits_ended: u32,
    pub catches: u32,
    pub respawns: u32,
    /// Session clock at the latest catch (ms)
    pub last_catch_ms: Option<f64>,
}

impl PursuitStats {
    pub fn record(&mut self, event: &SimulationEvent) {
        match event {
            SimulationEvent::PursuitStateChanged(changed) if changed.is_pursuing => {
                self.pursuits_started += 1;
            }
            SimulationEvent::PursuitStateChanged(_) => self.pursuits_ended += 1,
            SimulationEvent::AgentCaughtPlayer(caught) => {
                self.catches += 1;
                self.last_catch_ms = Some(caught.at_ms);
            }
            SimulationEvent::PlayerRespawned(_) => self.respawns += 1,
        }
    }
}
