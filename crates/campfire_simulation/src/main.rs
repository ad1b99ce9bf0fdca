//! Headless pursuit run
//!
//! Drives the full plugin without rendering: a scripted player alternates
//! between walking up to the agent and sprinting away from it.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use campfire_simulation::ai::{spawn_agent, AgentVisualLoaded};
use campfire_simulation::logger::{self, LogLevel};
use campfire_simulation::player::spawn_player;
use campfire_simulation::spatial::{horizontal_direction, spawn_proximity_zone};
use campfire_simulation::{
    create_pursuit_app, HudState, Player, PlayerIntent, PursuitConfig, PursuitSession,
    PursuitStats,
};

/// Headless campfire pursuit simulation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed for wander sampling
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Fixed steps to run (60 per simulated second)
    #[arg(short, long, default_value_t = 3600)]
    ticks: u32,

    /// JSON config bundle (camelCase keys); defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log debug messages
    #[arg(short, long)]
    verbose: bool,
}

/// Frames per script phase (approach, then flee).
const SCRIPT_PHASE_TICKS: u32 = 600;

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init_logger();
    logger::set_log_level(if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    });

    let config = match &args.config {
        Some(path) => match PursuitConfig::from_json_file(path) {
            Ok(config) => config,
            Err(error) => {
                logger::log_error(&format!("{}", error));
                return ExitCode::FAILURE;
            }
        },
        None => PursuitConfig::default(),
    };

    println!(
        "Starting campfire headless simulation (seed: {}, ticks: {})",
        args.seed, args.ticks
    );

    let mut app = create_pursuit_app(args.seed, config);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / 60.0,
    )))
    .add_systems(Startup, setup_scene)
    .add_systems(Update, script_player);

    for tick in 0..args.ticks {
        app.update();

        if tick % 600 == 0 {
            if let Some(session) = app.world().get_resource::<PursuitSession>() {
                println!(
                    "Tick {}: agent {:?} at {:.1?}, player {:?}",
                    tick,
                    session.agent().state(),
                    session.agent().position(),
                    session.lifecycle().phase()
                );
            }
        }
    }

    let Some(session) = app.world().get_resource::<PursuitSession>() else {
        println!("No session (invalid configuration), nothing simulated");
        return ExitCode::FAILURE;
    };
    let stats = app.world().resource::<PursuitStats>();
    let hud = app.world().resource::<HudState>();

    println!("Simulation complete after {:.1}s", session.clock_ms() / 1000.0);
    println!(
        "  pursuits: {} started / {} ended",
        stats.pursuits_started, stats.pursuits_ended
    );
    println!("  catches: {}, respawns: {}", stats.catches, stats.respawns);
    println!(
        "  final: agent {:?}, player {:?}, chase warning {}",
        session.agent().state(),
        session.lifecycle().phase(),
        hud.chase_warning
    );

    ExitCode::SUCCESS
}

fn setup_scene(
    mut commands: Commands,
    config: Res<PursuitConfig>,
    mut visual_events: EventWriter<AgentVisualLoaded>,
) {
    spawn_player(&mut commands, &config);
    spawn_agent(&mut commands, &config);
    spawn_proximity_zone(&mut commands, "campfire", config.protected_zone_center, 3.0);

    // Nothing to load headless
    visual_events.write(AgentVisualLoaded);
}

/// Walks toward the agent, then sprints away, in alternating phases.
fn script_player(
    session: Option<Res<PursuitSession>>,
    mut players: Query<&mut PlayerIntent, With<Player>>,
    mut frame: Local<u32>,
) {
    *frame += 1;
    let Some(session) = session else {
        return;
    };
    let Some(handle) = session.player() else {
        return;
    };
    let Ok(mut intent) = players.single_mut() else {
        return;
    };

    let toward_agent =
        horizontal_direction(handle.position(), session.agent().position()).unwrap_or(Vec3::ZERO);
    let approaching = (*frame / SCRIPT_PHASE_TICKS) % 2 == 0;

    intent.direction = if approaching { toward_agent } else { -toward_agent };
    intent.sprint = !approaching;
}
