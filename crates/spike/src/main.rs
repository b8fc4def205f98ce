use anyhow::{Context, Result};
use antworld_core::{NeighborhoodDispersal, Position, WorldConfig, WorldGrid, WorldStats};
use clap::Parser;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Headless benchmark for the ant world: synthetic deposits and pickups each
/// tick, followed by one dispersal step.
#[derive(Parser, Debug)]
#[command(name = "antworld", version)]
struct Args {
    /// JSON world config; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    #[arg(long)]
    food_sources: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// Number of simulation ticks.
    #[arg(long, default_value_t = 200)]
    ticks: usize,
    /// Synthetic agent probes per tick.
    #[arg(long, default_value_t = 500)]
    probes: usize,
    #[arg(long, default_value_t = 0.1)]
    fraction: f32,
    #[arg(long, default_value_t = 0.01)]
    evaporation: f32,
    /// Log statistics every N ticks (0 disables).
    #[arg(long, default_value_t = 50)]
    report_every: usize,
}

#[derive(Serialize)]
struct RunReport {
    config: WorldConfig,
    ticks: usize,
    probes_per_tick: usize,
    pickups: u64,
    avg_tick_us: u64,
    avg_sweep_us: u64,
    stats: WorldStats,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(args: &Args) -> Result<WorldConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            WorldConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => WorldConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(n) = args.food_sources {
        config.initial_food_sources = n;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate().context("invalid world config")?;
    Ok(config)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = load_config(&args)?;
    let policy = NeighborhoodDispersal::new(args.fraction, args.evaporation)
        .context("invalid dispersal parameters")?;
    let mut world = WorldGrid::try_new(config.clone(), policy)?;
    let mut rng = ChaCha12Rng::seed_from_u64(config.seed.wrapping_add(1));
    let home = Position::new(world.width() as f64 - 1.0, world.height() as f64 / 2.0);

    let mut pickups = 0u64;
    let mut tick_time = Duration::ZERO;
    let mut sweep_us = 0u64;
    for tick in 1..=args.ticks {
        let start = Instant::now();
        for _ in 0..args.probes {
            let p = Position::new(
                rng.random_range(0.0..world.width() as f64),
                rng.random_range(0.0..world.height() as f64),
            );
            world.drop_foraging_pheromone(&p, 0.1);
            if world.contains_food(&p)? {
                world.pick_up_food(&p)?;
                world.drop_food_pheromone(&p, 1.0);
                world.drop_food(&home);
                pickups += 1;
            }
        }
        world.emit_food_scent();
        let timings = world.disperse_pheromones();
        sweep_us += timings.sweep_us;
        tick_time += start.elapsed();
        debug!(tick, sweep_us = timings.sweep_us, "tick complete");

        if args.report_every > 0 && tick % args.report_every == 0 {
            let stats = world.stats();
            info!(
                tick,
                food_delivered = stats.food_delivered,
                remaining_food = stats.remaining_food,
                foraging_total = stats.foraging_total,
                "progress"
            );
        }
    }

    let ticks = args.ticks.max(1) as u64;
    let report = RunReport {
        config,
        ticks: args.ticks,
        probes_per_tick: args.probes,
        pickups,
        avg_tick_us: tick_time.as_micros() as u64 / ticks,
        avg_sweep_us: sweep_us / ticks,
        stats: world.stats(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
