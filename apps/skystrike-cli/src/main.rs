use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use skystrike_input::{Key, Player, ScriptedInput};
use skystrike_kernel::{
    FixedTimestep, MissionStatus, RecordingAudio, SpawnTable, World, WorldConfig, WorldEvent,
};
use skystrike_render::{DebugTextRenderer, RenderView, Renderer};
use skystrike_tools::WorldInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skystrike-cli", about = "Headless runner for skystrike missions")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct MissionArgs {
    /// RNG seed (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,
    /// World config YAML file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Enemy spawn table YAML file (defaults to the stock mission)
    #[arg(long)]
    level: Option<PathBuf>,
}

#[derive(clap::Args)]
struct ScriptArgs {
    /// Keys held for the whole run, comma separated (e.g. "left,space")
    #[arg(long, value_delimiter = ',')]
    hold: Vec<String>,
    /// Tap the missile key every N updates
    #[arg(long)]
    missile_every: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and stock mission info
    Info,
    /// Run a mission headless and print a summary
    Simulate {
        #[command(flatten)]
        mission: MissionArgs,
        #[command(flatten)]
        script: ScriptArgs,
        /// Maximum number of fixed updates
        #[arg(short, long, default_value = "3600")]
        frames: u64,
        /// Wall-clock time per rendered frame in milliseconds
        #[arg(long, default_value = "20")]
        wall_ms: u64,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Advance a mission and dump one debug frame
    Render {
        #[command(flatten)]
        mission: MissionArgs,
        /// Number of fixed updates before rendering
        #[arg(short, long, default_value = "0")]
        frames: u64,
        /// Also print the scene tree
        #[arg(long)]
        tree: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let config = WorldConfig::default();
            let table = SpawnTable::standard();
            println!("skystrike-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "view: {}x{}, level height: {}, scroll: {}/s",
                config.view_size.x, config.view_size.y, config.world_height, config.scroll_speed
            );
            println!("stock mission: {} enemies", table.len());
            let world = World::new(config, &table)?;
            println!("{}", WorldInspector::summary(&world));
        }
        Commands::Simulate {
            mission,
            script,
            frames,
            wall_ms,
            json,
        } => {
            let mut world = build_world(&mission)?;
            let held = parse_keys(&script.hold)?;
            let report = simulate(&mut world, &held, script.missile_every, frames, wall_ms)?;
            let summary = WorldInspector::summary(&world);

            if json {
                let out = serde_json::json!({
                    "summary": summary,
                    "enemies_spawned": report.enemies_spawned,
                    "collisions": report.collisions,
                    "wrecks_removed": report.wrecks_removed,
                    "sounds_played": report.sounds_played,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{summary}");
                println!(
                    "enemies spawned={} collisions={} wrecks removed={} sounds={}",
                    report.enemies_spawned,
                    report.collisions,
                    report.wrecks_removed,
                    report.sounds_played
                );
            }
        }
        Commands::Render {
            mission,
            frames,
            tree,
        } => {
            let mut world = build_world(&mission)?;
            simulate(&mut world, &[], None, frames, 20)?;
            let output = DebugTextRenderer::new().render(&world, &RenderView::of(&world));
            print!("{output}");
            if tree {
                print!("{}", WorldInspector::tree(&world));
            }
        }
    }

    Ok(())
}

fn build_world(args: &MissionArgs) -> anyhow::Result<World> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => WorldConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let table = match &args.level {
        Some(path) => SpawnTable::load(path)
            .with_context(|| format!("loading spawn table {}", path.display()))?,
        None => SpawnTable::standard(),
    };
    Ok(World::new(config, &table)?)
}

fn load_config(path: &Path) -> anyhow::Result<WorldConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_yaml::from_str(&source).with_context(|| format!("parsing config {}", path.display()))
}

fn parse_keys(names: &[String]) -> anyhow::Result<Vec<Key>> {
    names
        .iter()
        .filter(|name| !name.trim().is_empty())
        .map(|name| name.parse::<Key>().map_err(anyhow::Error::from))
        .collect()
}

#[derive(Debug, Default)]
struct Report {
    enemies_spawned: usize,
    collisions: usize,
    wrecks_removed: usize,
    sounds_played: usize,
}

/// Drive `world` with a scripted player until the mission is decided or
/// `max_updates` fixed steps have run. Wall time advances by `wall_ms` per
/// rendered frame and is consumed in fixed steps.
fn simulate(
    world: &mut World,
    held: &[Key],
    missile_every: Option<u64>,
    max_updates: u64,
    wall_ms: u64,
) -> anyhow::Result<Report> {
    let mut player = Player::new(world.config().player_speed);
    let mut input = ScriptedInput::new();
    for key in held {
        input.press(*key);
    }
    input.drain_events();

    let missile_key = player
        .assigned_key(skystrike_input::PlayerAction::LaunchMissile)
        .context("missile launch has no key")?;
    let mut clock = FixedTimestep::default();
    let mut audio = RecordingAudio::new();
    let mut report = Report::default();
    let mut updates = 0;
    let mut last_tap = None;

    anyhow::ensure!(wall_ms > 0, "wall-clock frame time must be positive");
    while updates < max_updates && player.mission_status() == MissionStatus::Running {
        if let Some(every) = missile_every.filter(|n| *n > 0)
            && updates % every == 0
            && last_tap != Some(updates)
        {
            input.tap(missile_key);
            last_tap = Some(updates);
        }
        for event in input.drain_events() {
            player.handle_event(&event, world.commands_mut());
        }

        for _ in 0..clock.advance(Duration::from_millis(wall_ms)) {
            if updates >= max_updates {
                break;
            }
            world.update(clock.step(), &mut audio);
            updates += 1;

            let status = world.mission_status();
            if status != MissionStatus::Running {
                player.set_mission_status(status);
                break;
            }
            player.handle_realtime_input(&input, world.commands_mut());
        }

        for event in world.drain_events() {
            match event {
                WorldEvent::EnemySpawned { .. } => report.enemies_spawned += 1,
                WorldEvent::Collision(_) => report.collisions += 1,
                WorldEvent::WrecksRemoved { count } => report.wrecks_removed += count,
                WorldEvent::Stepped { .. } => {}
            }
        }
    }

    report.sounds_played = audio.played.len();
    tracing::info!(
        updates,
        status = ?player.mission_status(),
        "simulation finished"
    );
    Ok(report)
}
