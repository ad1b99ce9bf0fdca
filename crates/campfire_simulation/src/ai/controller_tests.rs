//! Tests for the agent state machine.

#[cfg(test)]
mod tests {
    use super::super::controller::*;
    use crate::config::PursuitConfig;
    use crate::error::{ConfigError, MissingReference};
    use crate::logger::LogCapture;
    use crate::player::PlayerHandle;
    use crate::spatial::{horizontal_distance, horizontal_length};
    use approx::assert_relative_eq;
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    const FRAME_MS: f32 = 16.0;

    fn active_agent(config: &PursuitConfig, player_at: Vec3) -> (AgentController, PlayerHandle) {
        let mut agent = AgentController::new(config, ChaCha8Rng::seed_from_u64(7))
            .expect("default config is valid");
        let player = PlayerHandle::new(player_at);
        agent.attach(AgentDependencies {
            player: player.clone(),
        });
        agent.set_visual_ready(true);
        (agent, player)
    }

    /// Player placed `distance` metres from the agent along +x.
    fn place_player(agent: &AgentController, player: &PlayerHandle, distance: f32) {
        player.move_to(agent.position() + Vec3::new(distance, 0.0, 0.0));
    }

    #[test]
    fn test_starts_wandering_with_destination() {
        let config = PursuitConfig::default();
        let (agent, _) = active_agent(&config, Vec3::new(20.0, 0.0, 0.0));

        assert_eq!(agent.state(), AgentState::Wandering);
        assert!(!agent.is_pursuing());
        assert_eq!(agent.position(), Vec3::new(0.0, 0.0, -5.0));
        assert!(horizontal_length(agent.destination()) <= config.boundary_radius + 1e-4);
    }

    #[test]
    fn test_enters_pursuit_on_first_qualifying_tick() {
        let config = PursuitConfig::default();
        let (mut agent, player) = active_agent(&config, Vec3::ZERO);

        place_player(&agent, &player, config.detection_radius - 1.0);
        assert_eq!(agent.tick(FRAME_MS), TickOutcome::Advanced);
        assert_eq!(agent.state(), AgentState::Pursuing);

        for _ in 0..10 {
            place_player(&agent, &player, config.detection_radius - 1.0);
            agent.tick(FRAME_MS);
            assert!(agent.is_pursuing());
        }

        // One edge only
        let events = agent.drain_events();
        assert_eq!(events.len(), 1);
        assert!(events[0].is_pursuing);
    }

    #[test]
    fn test_leaves_pursuit_past_exit_radius() {
        let config = PursuitConfig::default();
        let (mut agent, player) = active_agent(&config, Vec3::ZERO);

        place_player(&agent, &player, 2.0);
        agent.tick(FRAME_MS);
        assert!(agent.is_pursuing());
        agent.drain_events();

        let exit = config.detection_radius * config.chase_exit_multiplier;
        place_player(&agent, &player, exit + 1.0);
        agent.tick(FRAME_MS);

        assert_eq!(agent.state(), AgentState::Wandering);
        let events = agent.drain_events();
        assert_eq!(events.len(), 1);
        assert!(!events[0].is_pursuing);
    }

    #[rstest]
    #[case(8.0)]
    #[case(9.0)]
    #[case(10.5)]
    #[case(11.9)]
    fn test_hysteresis_band_keeps_pursuit(#[case] distance: f32) {
        let config = PursuitConfig::default();
        let (mut agent, player) = active_agent(&config, Vec3::ZERO);

        place_player(&agent, &player, 1.0);
        agent.tick(FRAME_MS);
        assert!(agent.is_pursuing());

        for _ in 0..30 {
            place_player(&agent, &player, distance);
            agent.tick(FRAME_MS);
            assert!(agent.is_pursuing(), "dropped pursuit at {distance}m");
        }
        assert_eq!(agent.drain_events().len(), 1);
    }

    #[test]
    fn test_loitering_at_detection_edge_does_not_flicker() {
        let config = PursuitConfig::default();
        let (mut agent, player) = active_agent(&config, Vec3::ZERO);

        // Alternate just inside / just outside the entry radius
        for i in 0..60 {
            let offset = if i % 2 == 0 { -0.1 } else { 0.1 };
            place_player(&agent, &player, config.detection_radius + offset);
            agent.tick(FRAME_MS);
        }

        assert!(agent.is_pursuing());
        assert_eq!(agent.drain_events().len(), 1);
    }

    #[test]
    fn test_inert_without_player() {
        let _capture = LogCapture::install();
        let config = PursuitConfig::default();
        let mut agent = AgentController::new(&config, ChaCha8Rng::seed_from_u64(1)).unwrap();
        agent.set_visual_ready(true);
        let start = agent.position();

        for _ in 0..5 {
            assert_eq!(
                agent.tick(FRAME_MS),
                TickOutcome::Inert(MissingReference::Player)
            );
        }
        assert_eq!(agent.position(), start);
        assert!(!agent.is_attached());
    }

    #[test]
    fn test_inert_until_visual_loaded() {
        let _capture = LogCapture::install();
        let config = PursuitConfig::default();
        let mut agent = AgentController::new(&config, ChaCha8Rng::seed_from_u64(1)).unwrap();
        let player = PlayerHandle::new(agent.position() + Vec3::new(1.0, 0.0, 0.0));
        agent.attach(AgentDependencies { player });
        let start = agent.position();

        assert_eq!(
            agent.tick(FRAME_MS),
            TickOutcome::Inert(MissingReference::AgentVisual)
        );
        assert_eq!(agent.state(), AgentState::Wandering);
        assert_eq!(agent.position(), start);

        agent.set_visual_ready(true);
        assert_eq!(agent.tick(FRAME_MS), TickOutcome::Advanced);
        assert!(agent.is_pursuing());
    }

    #[test]
    fn test_missing_player_warning_logged_once_per_detachment() {
        let capture = LogCapture::install();
        let config = PursuitConfig::default();
        let mut agent = AgentController::new(&config, ChaCha8Rng::seed_from_u64(1)).unwrap();
        agent.set_visual_ready(true);
        assert!(agent.is_visual_ready());

        for _ in 0..5 {
            agent.tick(FRAME_MS);
        }
        assert_eq!(capture.count("Agent: no player handle attached"), 1);

        let player = PlayerHandle::new(Vec3::new(20.0, 0.0, 0.0));
        agent.attach(AgentDependencies { player });
        assert_eq!(agent.tick(FRAME_MS), TickOutcome::Advanced);

        agent.detach();
        assert!(!agent.is_attached());
        for _ in 0..5 {
            assert_eq!(
                agent.tick(FRAME_MS),
                TickOutcome::Inert(MissingReference::Player)
            );
        }
        assert_eq!(capture.count("Agent: no player handle attached"), 2);
    }

    #[test]
    fn test_missing_visual_warning_rearmed_by_reload() {
        let capture = LogCapture::install();
        let config = PursuitConfig::default();
        let (mut agent, _) = active_agent(&config, Vec3::new(20.0, 0.0, 0.0));

        agent.set_visual_ready(false);
        assert!(!agent.is_visual_ready());
        for _ in 0..5 {
            agent.tick(FRAME_MS);
        }
        assert_eq!(capture.count("Agent: visual not loaded yet"), 1);

        agent.set_visual_ready(true);
        agent.tick(FRAME_MS);
        agent.set_visual_ready(false);
        agent.tick(FRAME_MS);
        agent.tick(FRAME_MS);
        assert_eq!(capture.count("Agent: visual not loaded yet"), 2);
    }

    #[test]
    fn test_visual_unload_ends_pursuit() {
        let _capture = LogCapture::install();
        let config = PursuitConfig::default();
        let (mut agent, player) = active_agent(&config, Vec3::ZERO);

        place_player(&agent, &player, 1.0);
        agent.tick(FRAME_MS);
        assert!(agent.is_pursuing());
        agent.drain_events();

        agent.set_visual_ready(false);
        assert_eq!(agent.state(), AgentState::Wandering);
        let events = agent.drain_events();
        assert_eq!(events.len(), 1);
        assert!(!events[0].is_pursuing);

        // Reloading with the player still close starts a fresh chase
        agent.set_visual_ready(true);
        agent.tick(FRAME_MS);
        assert!(agent.is_pursuing());
        assert_eq!(agent.drain_events().len(), 1);
    }

    #[test]
    fn test_detach_ends_pursuit() {
        let _capture = LogCapture::install();
        let config = PursuitConfig::default();
        let (mut agent, player) = active_agent(&config, Vec3::ZERO);

        place_player(&agent, &player, 1.0);
        agent.tick(FRAME_MS);
        assert!(agent.is_pursuing());
        agent.drain_events();

        agent.detach();
        assert_eq!(agent.state(), AgentState::Wandering);
        let events = agent.drain_events();
        assert_eq!(events.len(), 1);
        assert!(!events[0].is_pursuing);

        // Nothing more while detached
        agent.tick(FRAME_MS);
        assert!(agent.drain_events().is_empty());
    }

    #[test]
    fn test_wandering_stays_inside_boundary() {
        let config = PursuitConfig::default();
        let (mut agent, _) = active_agent(&config, Vec3::new(0.0, 0.0, 24.0));

        for _ in 0..5_000 {
            agent.tick(100.0);
            assert!(horizontal_length(agent.position()) <= config.boundary_radius + 1e-3);
            assert_eq!(agent.position().y, config.ground_level);
        }
    }

    #[test]
    fn test_pursuit_clamped_at_boundary() {
        let config = PursuitConfig {
            detection_radius: 60.0,
            ..Default::default()
        };
        // Player outside the agent's playable circle
        let (mut agent, _) = active_agent(&config, Vec3::new(40.0, 0.0, 0.0));

        for _ in 0..1_000 {
            agent.tick(50.0);
            assert!(agent.is_pursuing());
            assert!(horizontal_length(agent.position()) <= config.boundary_radius + 1e-3);
        }
        assert_relative_eq!(
            horizontal_length(agent.position()),
            config.boundary_radius,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_step_does_not_overshoot_destination() {
        let config = PursuitConfig {
            wander_min_dist: 1.0,
            wander_max_dist: 1.0,
            protected_zone_radius: 0.0,
            ..Default::default()
        };
        let (mut agent, _) = active_agent(&config, Vec3::new(0.0, 0.0, 25.0));
        let destination = agent.destination();
        assert_relative_eq!(
            horizontal_distance(agent.position(), destination),
            1.0,
            epsilon = 1e-4
        );

        // 1.5 m/s over one second would pass a 1 m target
        agent.tick(1000.0);
        assert!(horizontal_distance(agent.position(), destination) < 1e-4);
    }

    #[test]
    fn test_resampling_twice_keeps_last_destination() {
        let config = PursuitConfig::default();
        let (mut agent, _) = active_agent(&config, Vec3::new(0.0, 0.0, 24.0));

        agent.tick(1200.0);
        assert!(agent.agent().wander_elapsed_ms > 0.0);

        agent.set_random_destination();
        agent.set_random_destination();
        let destination = agent.destination();

        assert_eq!(agent.agent().wander_elapsed_ms, 0.0);
        assert!(horizontal_length(destination) <= config.boundary_radius + 1e-4);
        assert!(
            horizontal_distance(destination, config.protected_zone_center)
                >= config.protected_zone_radius
        );

        let before = agent.position();
        agent.tick(FRAME_MS);
        // Moved toward the final destination, not an earlier sample
        let travelled = agent.position() - before;
        let wanted = (destination - before).normalize();
        assert_relative_eq!(travelled.normalize().dot(wanted), 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_force_reset_ends_pursuit() {
        let config = PursuitConfig::default();
        let (mut agent, player) = active_agent(&config, Vec3::ZERO);

        place_player(&agent, &player, 1.0);
        for _ in 0..20 {
            agent.tick(FRAME_MS);
        }
        assert!(agent.is_pursuing());
        agent.drain_events();

        agent.force_reset(config.agent_spawn_point);

        assert_eq!(agent.state(), AgentState::Wandering);
        assert_eq!(agent.position(), config.agent_spawn_point);
        assert_eq!(agent.agent().wander_elapsed_ms, 0.0);
        let events = agent.drain_events();
        assert_eq!(events.len(), 1);
        assert!(!events[0].is_pursuing);

        // Already wandering: reset is silent
        agent.force_reset(config.agent_spawn_point);
        assert!(agent.drain_events().is_empty());
    }

    #[test]
    fn test_reentry_after_reset_needs_entry_radius() {
        let config = PursuitConfig::default();
        let (mut agent, player) = active_agent(&config, Vec3::ZERO);

        place_player(&agent, &player, 1.0);
        agent.tick(FRAME_MS);
        agent.force_reset(config.agent_spawn_point);

        // Inside the exit band but outside the entry radius
        place_player(&agent, &player, 10.0);
        agent.tick(FRAME_MS);
        assert!(!agent.is_pursuing());
    }

    #[rstest]
    #[case(1.0)]
    #[case(0.5)]
    #[case(-2.0)]
    fn test_rejects_exit_multiplier_without_hysteresis(#[case] multiplier: f32) {
        let config = PursuitConfig {
            chase_exit_multiplier: multiplier,
            ..Default::default()
        };
        let result = AgentController::new(&config, ChaCha8Rng::seed_from_u64(0));
        assert_eq!(
            result.err(),
            Some(ConfigError::ChaseExitMultiplier(multiplier))
        );
    }

    #[test]
    fn test_same_seed_same_path() {
        let config = PursuitConfig::default();
        let run = || {
            let (mut agent, _) = active_agent(&config, Vec3::new(0.0, 0.0, 24.0));
            (0..600)
                .map(|_| {
                    agent.tick(FRAME_MS);
                    agent.position()
                })
                .collect::<Vec<_>>()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_bad_delta_is_ignored() {
        let config = PursuitConfig::default();
        let (mut agent, _) = active_agent(&config, Vec3::new(0.0, 0.0, 24.0));
        let start = agent.position();

        agent.tick(f32::NAN);
        agent.tick(-50.0);
        assert_eq!(agent.position(), start);
    }
}
