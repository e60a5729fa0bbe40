use std::path::{Path, PathBuf};

use anyhow::Context;
use cityscape_input::{Action, InputState, ScriptedInput};
use cityscape_render::{DebugTextRenderer, Renderer};
use cityscape_sim::{SimConfig, Simulation};
use cityscape_tools::WindowInspector;
use clap::{Args, Parser, Subcommand};
use glam::DVec2;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cityscape-cli", about = "Headless runner for the streaming city")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Walk the observer through the city and print a summary
    Run {
        #[command(flatten)]
        walk: WalkArgs,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
        /// Also print the last rendered frame
        #[arg(long)]
        frame: bool,
    },
    /// Print the window's height map after a walk
    Inspect {
        #[command(flatten)]
        walk: WalkArgs,
    },
    /// Run the same walk twice and compare state hashes
    Replay {
        #[command(flatten)]
        walk: WalkArgs,
    },
    /// Print the effective configuration as JSON
    Config {
        /// Config file to merge over the defaults
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// A constant-input walk: the same keys held and the same pointer motion
/// every tick.
#[derive(Args, Clone)]
struct WalkArgs {
    /// Number of ticks to simulate
    #[arg(short, long, default_value = "600")]
    ticks: u64,
    /// RNG seed for the city
    #[arg(short, long, default_value = "42")]
    seed: u64,
    /// JSON config file; missing fields take defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Horizontal pointer motion per tick (turns the observer)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    turn: f64,
    /// Hold sprint
    #[arg(long)]
    sprint: bool,
    /// Hold interact
    #[arg(long)]
    interact: bool,
}

impl WalkArgs {
    fn input(&self) -> ScriptedInput {
        let mut held = vec![Action::MoveForward];
        if self.sprint {
            held.push(Action::Sprint);
        }
        if self.interact {
            held.push(Action::Interact);
        }
        ScriptedInput::constant(InputState::holding(held).with_pointer(DVec2::new(self.turn, 0.0)))
    }

    fn walk<R: Renderer>(&self, renderer: &R) -> anyhow::Result<(Simulation, Option<R::Output>)> {
        let config = load_config(self.config.as_deref())?;
        tracing::info!(seed = self.seed, ticks = self.ticks, "walk starting");
        let mut sim = Simulation::new(config, self.seed)?;
        let summary = sim.run(&mut self.input(), renderer, self.ticks);
        Ok((sim, summary.last_output))
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SimConfig> {
    match path {
        Some(path) => SimConfig::load(path).with_context(|| format!("loading {}", path.display())),
        None => Ok(SimConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("cityscape-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("stream: {}", cityscape_stream::crate_info());
            println!("render: {}", cityscape_render::crate_info());
            println!("tools: {}", cityscape_tools::crate_info());
            println!("sim: {}", cityscape_sim::crate_info());
            let config = SimConfig::default();
            println!(
                "window: {n}x{n} cells, pitch {}, footprint {}",
                config.world.pitch,
                config.world.footprint,
                n = config.world.grid_size
            );
        }
        Commands::Run { walk, json, frame } => {
            let (sim, output) = walk.walk(&DebugTextRenderer::new())?;
            let summary = WindowInspector::summary(sim.world(), sim.stream_stats());
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
                let timer = sim.timer();
                println!(
                    "Timing: avg={:?} min={:?} max={:?} over last {} ticks",
                    timer.average(),
                    timer.min(),
                    timer.max(),
                    timer.len()
                );
            }
            if let (true, Some(output)) = (frame, output) {
                print!("{output}");
            }
        }
        Commands::Inspect { walk } => {
            let (sim, _) = walk.walk(&DebugTextRenderer::new())?;
            let world = sim.world();
            println!("{}", WindowInspector::summary(world, sim.stream_stats()));
            match WindowInspector::observer_slot(world) {
                Some(slot) => println!("Observer slot: {slot}"),
                None => println!("Observer slot: outside window"),
            }
            print!("{}", WindowInspector::height_map(world));
        }
        Commands::Replay { walk } => {
            println!("Deterministic replay: seed={}, ticks={}", walk.seed, walk.ticks);
            let renderer = DebugTextRenderer::new();
            let (first, _) = walk.walk(&renderer)?;
            let (second, _) = walk.walk(&renderer)?;
            let (a, b) = (first.world().state_hash(), second.world().state_hash());
            println!("Run 1: tick={} hash={a:016x}", first.world().tick());
            println!("Run 2: tick={} hash={b:016x}", second.world().tick());
            if a != b {
                anyhow::bail!("replay diverged: {a:016x} != {b:016x}");
            }
            println!("Match: OK");
        }
        Commands::Config { config } => {
            let config = load_config(config.as_deref())?;
            println!("{}", config.to_json_pretty()?);
        }
    }

    Ok(())
}
