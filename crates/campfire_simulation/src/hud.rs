//! HUD state driven by core events: chase warning, death overlay, countdown.

use bevy::prelude::*;

use crate::ai::PursuitStateChanged;
use crate::lifecycle::{dispatch_effects, PlayerCollaborator, PlayerEffect, PlayerEffectRequested};

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HudState {
    /// Shown while the agent is pursuing
    pub chase_warning: bool,
    pub death_overlay: bool,
    /// Seconds until respawn, `None` while alive
    pub countdown_seconds: Option<u32>,
}

impl HudState {
    pub fn on_pursuit_changed(&mut self, changed: PursuitStateChanged) {
        self.chase_warning = changed.is_pursuing;
    }
}

impl PlayerCollaborator for HudState {
    fn apply_effect(&mut self, effect: PlayerEffect) {
        match effect {
            PlayerEffect::SetDeathOverlayVisible(visible) => {
                self.death_overlay = visible;
                if !visible {
                    self.countdown_seconds = None;
                }
            }
            PlayerEffect::UpdateCountdown(seconds) => self.countdown_seconds = Some(seconds),
            PlayerEffect::SetInputEnabled(_) | PlayerEffect::SetLightEnabled(_) => {}
        }
    }
}

/// System: core events → HUD resource.
pub fn update_hud(
    mut pursuit: EventReader<PursuitStateChanged>,
    mut effects: EventReader<PlayerEffectRequested>,
    mut hud: ResMut<HudState>,
) {
    for changed in pursuit.read() {
        hud.on_pursuit_changed(*changed);
    }
    dispatch_effects(effects.read().map(|request| request.0), &mut *hud);
}
