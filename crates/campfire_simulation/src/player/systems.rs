//! Player-side systems: movement, sprint, flashlight, lifecycle effects.

use bevy::prelude::*;

use crate::config::PursuitConfig;
use crate::lifecycle::{PlayerCollaborator, PlayerEffect, PlayerEffectRequested};
use crate::player::{Flashlight, Player, PlayerControls, PlayerIntent, SprintEdge, SprintStamina};
use crate::session::PursuitSession;
use crate::spatial::{horizontal, horizontal_length, BoundaryPolicy, Containment, DIRECTION_EPSILON};

/// Sprint started (`true`) or stopped.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SprintChanged {
    pub sprinting: bool,
}

/// Flashlight switched, by key or by the lifecycle.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FlashlightToggled {
    pub on: bool,
    pub intensity: f32,
}

/// Spawns the player entity at the configured respawn point.
///
/// The session picks it up through `attach_spawned_player`.
pub fn spawn_player(commands: &mut Commands, config: &PursuitConfig) -> Entity {
    let start = config.respawn_point;
    commands
        .spawn((
            Player,
            Transform::from_translation(start),
            PlayerIntent::default(),
            PlayerControls::default(),
            Flashlight::default(),
            SprintStamina::new(config.stamina),
            Containment::new(
                BoundaryPolicy::RollbackToLastValid,
                config.player_boundary_radius,
                start,
            ),
        ))
        .id()
}

/// System: intent → shared player handle, with rollback containment.
pub fn move_player_from_intent(
    time: Res<Time<Fixed>>,
    session: Option<Res<PursuitSession>>,
    mut players: Query<
        (
            &PlayerIntent,
            &PlayerControls,
            &SprintStamina,
            &mut Containment,
            &mut Transform,
        ),
        With<Player>,
    >,
) {
    let Some(session) = session else {
        return;
    };
    let Some(handle) = session.player() else {
        return;
    };
    let Ok((intent, controls, stamina, mut containment, mut transform)) = players.single_mut()
    else {
        return;
    };

    if !controls.movement_enabled || !handle.is_alive() {
        return;
    }
    let direction = horizontal(intent.direction).normalize_or_zero();
    if direction == Vec3::ZERO {
        return;
    }

    let speed = session.config().player_speed * stamina.speed_multiplier();
    let next = containment.apply(handle.position() + direction * speed * time.delta_secs());
    handle.move_to(next);
    transform.translation = next;
}

/// System: sprint key + movement → stamina drain/recovery.
pub fn tick_sprint_stamina(
    time: Res<Time<Fixed>>,
    mut players: Query<(&PlayerIntent, &PlayerControls, &mut SprintStamina), With<Player>>,
    mut sprint_events: EventWriter<SprintChanged>,
) {
    let delta_ms = time.delta_secs() * 1000.0;

    for (intent, controls, mut stamina) in players.iter_mut() {
        // Input gated off: sprint key is ignored, like any other key
        let wants_sprint = intent.sprint && controls.movement_enabled;
        let is_moving =
            controls.movement_enabled && horizontal_length(intent.direction) > DIRECTION_EPSILON;

        let requested = if wants_sprint {
            stamina.start_sprint()
        } else {
            stamina.stop_sprint()
        };
        let forced = stamina.tick(delta_ms, is_moving);

        for edge in requested.into_iter().chain(forced) {
            sprint_events.write(SprintChanged {
                sprinting: edge == SprintEdge::Started,
            });
        }
    }
}

/// System: flashlight key, ignored while input is gated off.
pub fn toggle_flashlight_from_intent(
    mut players: Query<(&mut PlayerIntent, &PlayerControls, &mut Flashlight), With<Player>>,
    mut light_events: EventWriter<FlashlightToggled>,
) {
    for (mut intent, controls, mut flashlight) in players.iter_mut() {
        if !intent.toggle_flashlight {
            continue;
        }
        // Key press is consumed either way
        intent.toggle_flashlight = false;
        if !controls.look_enabled {
            continue;
        }

        let on = flashlight.toggle();
        light_events.write(FlashlightToggled {
            on,
            intensity: flashlight.intensity(),
        });
    }
}

/// Input and light side of the player, as the lifecycle sees it.
pub struct PlayerRig<'a> {
    pub controls: &'a mut PlayerControls,
    pub flashlight: &'a mut Flashlight,
    /// Light switches applied, for `FlashlightToggled`
    pub light_changes: Vec<bool>,
}

impl PlayerCollaborator for PlayerRig<'_> {
    fn apply_effect(&mut self, effect: PlayerEffect) {
        match effect {
            PlayerEffect::SetInputEnabled(enabled) => self.controls.set_enabled(enabled),
            PlayerEffect::SetLightEnabled(on) => {
                if self.flashlight.set_on(on) {
                    self.light_changes.push(on);
                }
            }
            // HUD concerns
            PlayerEffect::SetDeathOverlayVisible(_) | PlayerEffect::UpdateCountdown(_) => {}
        }
    }
}

/// System: lifecycle effect requests → controls + flashlight.
pub fn apply_player_effects(
    mut requests: EventReader<PlayerEffectRequested>,
    mut players: Query<(&mut PlayerControls, &mut Flashlight), With<Player>>,
    mut light_events: EventWriter<FlashlightToggled>,
) {
    let effects: Vec<PlayerEffect> = requests.read().map(|request| request.0).collect();
    if effects.is_empty() {
        return;
    }

    for (mut controls, mut flashlight) in players.iter_mut() {
        let mut rig = PlayerRig {
            controls: &mut controls,
            flashlight: &mut flashlight,
            light_changes: Vec::new(),
        };
        crate::lifecycle::dispatch_effects(effects.iter().copied(), &mut rig);

        let light_changes = std::mem::take(&mut rig.light_changes);
        for on in light_changes {
            light_events.write(FlashlightToggled {
                on,
                intensity: flashlight.intensity(),
            });
        }
    }
}

/// System: mirrors the shared handle into the player transform.
///
/// Only a respawn teleport makes them differ; containment restarts from there.
pub fn sync_player_transform(
    session: Option<Res<PursuitSession>>,
    mut players: Query<(&mut Transform, &mut Containment), With<Player>>,
) {
    let Some(handle) = session.as_ref().and_then(|session| session.player()) else {
        return;
    };
    let position = handle.position();

    for (mut transform, mut containment) in players.iter_mut() {
        if transform.translation != position {
            transform.translation = position;
            containment.reset(position);
        }
    }
}
