//! Headless evolution run.
//!
//! Evolves neural drivers against a synthetic reflex drill: every tick each
//! driver sees random ray readings, earns fitness for driving forward while
//! the road ahead is clear, and crashes when it drives forward into a wall
//! closer than one unit.

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use evodrive::config::Config;
use evodrive::control::neural::{DriverPopulation, NeuralDriver};
use evodrive::learning::evolution::EvolutionManager;
use evodrive::learning::evolvable::Evolvable;
use evodrive::logging;

/// Distance below which driving forward counts as a crash.
const CRASH_DISTANCE: f64 = 1.0;

#[derive(Parser, Debug)]
#[command(name = "evodrive", about = "Evolve neural drivers in a synthetic reflex drill")]
struct Cli {
    /// JSON configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<String>,

    /// Number of generations to run.
    #[arg(short, long, default_value_t = 10)]
    generations: usize,

    /// Simulated seconds per tick.
    #[arg(long, default_value_t = 0.05)]
    dt: f64,
}

fn main() -> anyhow::Result<()> {
    logging::init_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    anyhow::ensure!(cli.dt > 0.0, "dt must be positive");

    let max_distance = config.driver.maximum_ray_distance;
    let forward_ray = forward_ray_index(&config.driver.ray_angles);
    let mut drill_rng = match config.evolution.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_os_rng(),
    };

    let population = DriverPopulation::new(config.driver.clone())?;
    let mut manager = EvolutionManager::new(config.evolution.clone(), population)?;
    manager.generate_first_generation()?;

    info!(
        generations = cli.generations,
        members = manager.members().len(),
        genes = manager.best_genome()?.len(),
        "starting evolution"
    );

    while manager.generation_index() < cli.generations {
        for driver in manager.members_mut() {
            drill_tick(driver, &mut drill_rng, max_distance, forward_ray, cli.dt)?;
        }
        manager.update(cli.dt)?;
    }

    for (rank, code) in manager.best_genome_codes_of_last_generation().iter().enumerate() {
        info!(rank, code = %code, "parent genome of the last generation");
    }
    Ok(())
}

/// Runs one tick of the drill for one driver.
fn drill_tick(
    driver: &mut NeuralDriver,
    rng: &mut StdRng,
    max_distance: f64,
    forward_ray: usize,
    dt: f64,
) -> evodrive::error::Result<()> {
    if !driver.is_active() {
        return Ok(());
    }

    let ray_count = driver.brain().input_count();
    let hits: Vec<Option<f64>> = (0..ray_count)
        .map(|_| {
            let distance = rng.random_range(0.0..max_distance * 1.5);
            (distance < max_distance).then_some(distance)
        })
        .collect();

    driver.sense(&hits)?;
    let output = driver.drive();

    let clearance = hits
        .get(forward_ray)
        .copied()
        .flatten()
        .unwrap_or(max_distance);

    if output.linear > 0.0 && clearance < CRASH_DISTANCE {
        driver.record_crash();
    } else {
        driver.accrue_fitness(output.linear.max(0.0) * dt * clearance / max_distance);
    }
    Ok(())
}

/// Index of the ray pointing closest to straight ahead.
fn forward_ray_index(ray_angles: &[f64]) -> usize {
    ray_angles
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))
        .map_or(0, |(index, _)| index)
}
