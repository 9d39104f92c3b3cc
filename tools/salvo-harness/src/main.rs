//! salvo-harness: headless lock-and-fire scenario runner.
//!
//! Usage:
//!   salvo-harness run --hostiles 12 --seed 7 --lock-ticks 30 --flight-ticks 240
//!   salvo-harness run --config tuning.json

use std::path::PathBuf;
use std::process;

use glam::Vec3;
use salvo_core::commands::PlayerCommand;
use salvo_core::config::SimConfig;
use salvo_core::events::FeedbackEvent;
use salvo_core::types::Viewer;
use salvo_sim::SimulationEngine;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "salvo-harness: headless lock-on and homing burst runner\n\
         \n\
         Commands:\n\
         \n\
         run       Spawn a hostile field, hold lock, fire, and report\n\
         \n\
           --config <path>       JSON tuning file (optional, defaults otherwise)\n\
           --hostiles <N>        Hostiles in the field (default: 12)\n\
           --seed <N>            Override the config seed\n\
           --lock-ticks <N>      Ticks spent acquiring locks (default: 30)\n\
           --flight-ticks <N>    Ticks simulated after firing (default: 300)\n\
         \n\
         Set RUST_LOG=debug to see lock transitions.\n"
    );
}

fn parse_flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    for i in 0..args.len() {
        if args[i] == name && i + 1 < args.len() {
            return Some(args[i + 1].as_str());
        }
    }
    None
}

fn parse_count(args: &[String], name: &str, default: u64) -> u64 {
    match parse_flag(args, name) {
        Some(raw) => match raw.parse::<u64>() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("Error: {name} expects a non-negative integer, got {raw}");
                process::exit(1);
            }
        },
        None => default,
    }
}

fn load_config(args: &[String]) -> SimConfig {
    let Some(path) = parse_flag(args, "--config").map(PathBuf::from) else {
        return SimConfig::default();
    };

    let text = match std::fs::read_to_string(&path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {}: {e}", path.display());
            process::exit(1);
        }
    };
    match SimConfig::from_json_str(&text) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error in {}: {e}", path.display());
            process::exit(1);
        }
    }
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let mut config = load_config(args);
    if parse_flag(args, "--seed").is_some() {
        config.seed = parse_count(args, "--seed", config.seed);
    }
    let hostiles = parse_count(args, "--hostiles", 12) as usize;
    let lock_ticks = parse_count(args, "--lock-ticks", 30);
    let flight_ticks = parse_count(args, "--flight-ticks", 300);

    log::info!(
        "seed {} with {hostiles} hostiles, {lock_ticks} lock ticks, {flight_ticks} flight ticks",
        config.seed
    );

    let mut engine = SimulationEngine::new(config);
    engine.queue_command(PlayerCommand::SetViewer {
        viewer: Viewer::looking_to(Vec3::ZERO, Vec3::NEG_Z),
    });
    engine.spawn_hostile_field(hostiles, Vec3::new(0.0, 0.0, -30.0), Vec3::new(12.0, 6.0, 8.0));

    let mut locked = 0usize;
    let mut reactions = 0usize;
    for _ in 0..lock_ticks {
        engine.queue_command(PlayerCommand::AcquireLocks);
        let snap = engine.tick_fixed();
        locked = snap.locks.len();
    }

    engine.queue_command(PlayerCommand::CommitFire);
    let mut snap = engine.tick_fixed();
    for tick in 0..=flight_ticks {
        reactions += snap
            .events
            .iter()
            .filter(|e| matches!(e, FeedbackEvent::HitReaction { .. }))
            .count();
        if snap.projectiles.is_empty() || tick == flight_ticks {
            break;
        }
        snap = engine.tick_fixed();
    }

    let stats = engine.stats();
    let summary = serde_json::json!({
        "seed": engine.config().seed,
        "hostiles": hostiles,
        "locked_at_fire": locked,
        "bursts_fired": stats.bursts_fired,
        "projectiles_fired": stats.projectiles_fired,
        "hits": stats.hits,
        "expired": stats.expired,
        "in_flight": snap.projectiles.len(),
        "hit_reactions": reactions,
        "ticks": engine.time().tick,
        "elapsed_secs": engine.time().elapsed_secs,
    });

    match serde_json::to_string_pretty(&summary) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error encoding summary: {e}");
            process::exit(1);
        }
    }
}
