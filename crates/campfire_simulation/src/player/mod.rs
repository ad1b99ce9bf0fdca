//! Player side of the pursuit: the shared handle the core reads, and the
//! player-held collaborators (controls, flashlight, sprint stamina) the
//! lifecycle gates.

use bevy::prelude::*;

pub mod handle;
pub mod player;
pub mod stamina;
pub mod systems;


pub use handle::{PlayerBody, PlayerHandle};
pub use player::{Flashlight, Player, PlayerControls, PlayerIntent};
pub use stamina::{SprintEdge, SprintStamina};
pub use systems::{spawn_player, FlashlightToggled, PlayerRig, SprintChanged};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SprintChanged>()
            .add_event::<FlashlightToggled>();
    }
}
