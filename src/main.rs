use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use log::{info, warn, error, debug};

// Define modules used by main
mod batch;
mod constellation;
mod detection;
mod outage;
mod output;
mod report;
mod results;
mod sensors;
mod simulation;
mod terrain_grid;

use detection_common::SimulationConfig;
use simulation::OutageSimulation;

/// Compares ground sensors against satellite constellations for power outage detection.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Overrides the random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Overrides the number of rounds.
    #[arg(long)]
    rounds: Option<u32>,

    /// Overrides the number of outages generated per round.
    #[arg(long)]
    outages: Option<u32>,

    /// Runs this many independent simulations with consecutive seeds.
    #[arg(long)]
    runs: Option<u32>,
}

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init();
    let args = Args::parse();

    info!("Starting Power Outage Detection Simulation...");

    // --- Load Configuration ---
    let mut config = load_config(&args.config)?;
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(rounds) = args.rounds {
        config.simulation.rounds = rounds;
    }
    if let Some(outages) = args.outages {
        config.simulation.outages_per_round = outages;
    }
    if let Some(runs) = args.runs {
        config.batch.runs = runs;
    }
    config.validate()?;
    debug!("Configuration: {:#?}", config);

    if config.batch.runs > 1 {
        return run_batch_mode(&config);
    }

    // --- Initialize Simulation ---
    let start_time = Instant::now();
    let mut sim = OutageSimulation::new(config)?;
    info!(
        "Initialized {}x{} grid with {} ground sensors and {} satellites; {} rounds of {} outages, {:.0} minutes apart.",
        sim.grid().height(),
        sim.grid().width(),
        sim.sensors().len(),
        sim.fleet().total_satellites(),
        sim.params().rounds,
        sim.params().outages_per_round,
        sim.params().minutes_per_round
    );

    // --- Simulation Loop ---
    if let Err(e) = sim.run() {
        error!("Simulation failed after {} rounds: {}", sim.current_round(), e);
        anyhow::bail!("Simulation run failed.");
    }
    info!("Simulation finished in {:.3} seconds.", start_time.elapsed().as_secs_f64());

    // --- Report ---
    let summaries = sim.results().summaries();
    let analysis = report::analyze(&summaries);
    println!("{}", report::render(&summaries, &analysis));

    // --- Save Recorded Data ---
    let output_cfg = &sim.config().output;
    let run_summary = sim.run_summary();
    if output_cfg.save_summary {
        if let Err(e) = output::save_summary(&run_summary, output_cfg, Path::new(".")) {
            error!("{}", e);
        }
    } else {
        info!("Skipping saving run summary as per config (save_summary is false).");
    }
    if output_cfg.save_outcomes_csv {
        if let Err(e) = output::save_outcomes_csv(&run_summary, output_cfg, Path::new(".")) {
            error!("{}", e);
        }
    }

    info!("Simulation Complete.");
    Ok(())
}

/// Reads the config file, falling back to the reference run when it does not exist.
fn load_config(path: &Path) -> Result<SimulationConfig> {
    if path.exists() {
        SimulationConfig::load(path)
    } else {
        warn!("Config file '{}' not found. Using built-in defaults.", path.display());
        Ok(SimulationConfig::default())
    }
}

fn run_batch_mode(config: &SimulationConfig) -> Result<()> {
    let start_time = Instant::now();
    let result = batch::run_batch(config, config.batch.runs)?;
    info!(
        "Batch of {} runs finished in {:.3} seconds.",
        result.seeds.len(),
        start_time.elapsed().as_secs_f64()
    );

    println!("=== BATCH RESULTS (seeds {}..={}) ===", result.seeds[0], result.seeds[result.seeds.len() - 1]);
    println!("{:<26} {:<8} {:<10} {:<10} {:<10}", "Detection Method", "Runs", "Mean", "Min", "Max");
    println!("{}", "-".repeat(66));
    for stats in &result.detectors {
        println!(
            "{:<26} {:<8} {:<10} {:<10} {:<10}",
            stats.name,
            stats.runs,
            format!("{:.2}%", stats.mean_accuracy * 100.0),
            format!("{:.2}%", stats.min_accuracy * 100.0),
            format!("{:.2}%", stats.max_accuracy * 100.0)
        );
    }

    let output_cfg = &config.output;
    if output_cfg.save_summary {
        if let Err(e) = output::save_batch(&result, output_cfg, Path::new(".")) {
            error!("{}", e);
        }
    } else {
        info!("Skipping saving batch results as per config (save_summary is false).");
    }
    if output_cfg.save_outcomes_csv {
        if let Err(e) = output::save_batch_csv(&result, output_cfg, Path::new(".")) {
            error!("{}", e);
        }
    }
    Ok(())
}
