//! Shared player handle injected into the controllers.
//!
//! The host moves the player every frame; the core only reads the position,
//! except for the respawn teleport done by the lifecycle controller.

use bevy::prelude::*;
use std::sync::{Arc, PoisonError, RwLock};

/// Plain snapshot of the tracked player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerBody {
    pub position: Vec3,
    /// Owned by the lifecycle controller
    pub alive: bool,
}

/// Cheap clonable reference to the player body.
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    body: Arc<RwLock<PlayerBody>>,
}

impl PlayerHandle {
    pub fn new(position: Vec3) -> Self {
        Self {
            body: Arc::new(RwLock::new(PlayerBody {
                position,
                alive: true,
            })),
        }
    }

    pub fn snapshot(&self) -> PlayerBody {
        *self.body.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn position(&self) -> Vec3 {
        self.snapshot().position
    }

    pub fn is_alive(&self) -> bool {
        self.snapshot().alive
    }

    /// Host-driven movement (input, physics).
    pub fn move_to(&self, position: Vec3) {
        self.write(|body| body.position = position);
    }

    pub(crate) fn teleport(&self, position: Vec3) {
        self.write(|body| body.position = position);
    }

    pub(crate) fn set_alive(&self, alive: bool) {
        self.write(|body| body.alive = alive);
    }

    /// True when both handles point at the same player.
    pub fn same_player(&self, other: &PlayerHandle) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }

    fn write(&self, f: impl FnOnce(&mut PlayerBody)) {
        let mut body = self.body.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let handle = PlayerHandle::new(Vec3::ZERO);
        let other = handle.clone();

        other.move_to(Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(handle.position(), Vec3::new(1.0, 0.0, 2.0));
        assert!(handle.same_player(&other));
        assert!(!handle.same_player(&PlayerHandle::new(Vec3::ZERO)));
    }

    #[test]
    fn test_alive_flag() {
        let handle = PlayerHandle::new(Vec3::ZERO);
        assert!(handle.is_alive());
        handle.set_alive(false);
        assert!(!handle.snapshot().alive);
    }
}
