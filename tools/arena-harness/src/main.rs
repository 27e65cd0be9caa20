//! arena-harness: runs a headless arena with a scripted player.
//!
//! Usage:
//!   arena-harness run --scenario hard --ticks 3600 --seed 7
//!   arena-harness run --config tuning.json --json > final.json

use std::path::PathBuf;
use std::process;

use geneforge_core::commands::SimCommand;
use geneforge_core::constants::{DT, PLAYER_MOVE_SPEED};
use geneforge_core::enums::{GamePhase, ScenarioId};
use geneforge_core::events::SimEvent;
use geneforge_core::state::{EnemyView, GameStateSnapshot, PlayerView};
use geneforge_sim::{SimConfig, SimulationEngine, TuningConfig};
use glam::DVec3;

/// The scripted player backs off from anything closer than this.
const KEEP_AWAY_DISTANCE: f64 = 3.0;

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
        "arena-harness: headless GeneForge arena runner\n\
         \n\
         Commands:\n\
         \n\
         run       Play a scenario with a scripted player\n\
         \n\
           --scenario <name>  easy | medium | hard (default: easy)\n\
           --ticks <N>        Maximum ticks to run (default: 1800)\n\
           --seed <S>         RNG seed (default: 42)\n\
           --config <path>    Tuning config JSON (optional)\n\
           --json             Print the final snapshot as JSON\n\
         \n\
         Examples:\n\
         \n\
           arena-harness run --scenario hard --ticks 3600 --seed 7\n\
           RUST_LOG=debug arena-harness run --scenario medium\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_scenario(args: &[String]) -> Option<ScenarioId> {
    match flag_value(args, "--scenario") {
        None => Some(ScenarioId::Easy),
        Some("easy") => Some(ScenarioId::Easy),
        Some("medium") => Some(ScenarioId::Medium),
        Some("hard") => Some(ScenarioId::Hard),
        Some(_) => None,
    }
}

fn parse_number<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    match flag_value(args, flag) {
        None => default,
        Some(raw) => match raw.parse() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("Error: {flag} expects a number, got '{raw}'");
                process::exit(1);
            }
        },
    }
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let scenario = match parse_scenario(args) {
        Some(s) => s,
        None => {
            eprintln!("Error: --scenario must be easy, medium or hard");
            process::exit(1);
        }
    };
    let ticks: u64 = parse_number(args, "--ticks", 1800);
    let seed: u64 = parse_number(args, "--seed", 42);
    let json = args.iter().any(|a| a == "--json");

    let tuning = match flag_value(args, "--config").map(PathBuf::from) {
        Some(path) => match TuningConfig::load(&path) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        },
        None => TuningConfig::default(),
    };

    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        tuning,
        ..Default::default()
    });
    engine.queue_command(SimCommand::StartArena { scenario });

    let mut snapshot = engine.tick();
    let mut revives = 0u32;
    for _ in 1..ticks {
        if is_finished(&snapshot) {
            break;
        }
        if let Some(player) = &snapshot.player {
            engine.queue_commands(script_player(player, &snapshot.enemies));
        }
        snapshot = engine.tick();
        revives += snapshot
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::PlayerRevived { .. }))
            .count() as u32;
    }

    if json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error serializing snapshot: {e}");
                process::exit(1);
            }
        }
        return;
    }

    print_summary(scenario, seed, &snapshot, revives);
}

fn is_finished(snapshot: &GameStateSnapshot) -> bool {
    snapshot.phase == GamePhase::GameOver
        || (snapshot.score.enemies_total > 0
            && snapshot.score.enemies_killed >= snapshot.score.enemies_total
            && snapshot.enemies.is_empty())
}

/// Fire at the nearest living enemy; step away from it when it gets close.
fn script_player(player: &PlayerView, enemies: &[EnemyView]) -> Vec<SimCommand> {
    let nearest = enemies
        .iter()
        .filter(|e| e.alive)
        .min_by(|a, b| {
            let da = player.position.horizontal_distance_to(&a.position);
            let db = player.position.horizontal_distance_to(&b.position);
            da.total_cmp(&db)
        });
    let Some(target) = nearest else {
        return Vec::new();
    };

    let mut commands = vec![SimCommand::Fire {
        heading: player.position.heading_to(&target.position),
    }];

    let away = DVec3::new(
        player.position.x - target.position.x,
        player.position.y - target.position.y,
        0.0,
    );
    if away.length() < KEEP_AWAY_DISTANCE && away.length_squared() > 0.0 {
        let step = away.normalize() * PLAYER_MOVE_SPEED * DT;
        commands.push(SimCommand::MovePlayer {
            position: player.position.offset(step),
        });
    }
    commands
}

fn print_summary(scenario: ScenarioId, seed: u64, snapshot: &GameStateSnapshot, revives: u32) {
    let score = &snapshot.score;
    println!("scenario:        {scenario:?} (seed {seed})");
    println!("outcome:         {:?}", snapshot.phase);
    println!(
        "time:            {:.1}s ({} ticks)",
        score.run_time_secs, snapshot.time.tick
    );
    println!(
        "enemies killed:  {}/{}",
        score.enemies_killed, score.enemies_total
    );
    println!("shots fired:     {}", score.shots_fired);
    println!("chain hops:      {}", score.chain_hops);
    println!("damage dealt:    {:.1}", score.damage_dealt);
    println!("damage taken:    {:.1}", score.damage_taken);
    println!("revives:         {revives}");
    if let Some(player) = &snapshot.player {
        println!(
            "player:          {:.0}/{:.0} HP, {} lives left",
            player.hp, player.max_hp, player.lives
        );
    }
}
