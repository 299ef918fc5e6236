use crate::constellation::Fleet;
use crate::detection::evaluate_outage;
use crate::outage::generate_outages;
use crate::results::{Detector, ResultsAggregator};
use crate::sensors::SensorNetwork;
use crate::terrain_grid::TerrainGrid;
use anyhow::Result;
use detection_common::{RoundSnapshot, RunSummary, SimParams, SimulationConfig};
use log::{debug, info};
use rand::prelude::*;

/// Owns every component of one run and the single random stream they share.
///
/// Construction consumes draws for the terrain grid, then the ground network, then the
/// satellite fleet. Each round then draws outage locations, scores every outage against
/// the ground network and each constellation, and finally advances the fleet.
pub struct OutageSimulation {
    /// The simulation configuration this run was built from.
    config: SimulationConfig,
    params: SimParams,
    /// The one stream every draw comes from.
    rng: StdRng,
    grid: TerrainGrid,
    sensors: SensorNetwork,
    fleet: Fleet,
    results: ResultsAggregator,
    /// Number of rounds completed so far.
    current_round: u32,
    elapsed_minutes: f64,
    recorded_snapshots: Vec<RoundSnapshot>,
}

impl OutageSimulation {
    /// Builds the grid, ground network and constellations from the configured seed.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let params = config.get_sim_params();
        let mut rng = StdRng::seed_from_u64(params.seed);

        let grid = TerrainGrid::generate(&params, &mut rng);
        let sensors = SensorNetwork::deploy(&grid, &params, &mut rng);
        let fleet = Fleet::deploy(&mut rng);

        Ok(Self {
            config,
            params,
            rng,
            grid,
            sensors,
            fleet,
            results: ResultsAggregator::new(),
            current_round: 0,
            elapsed_minutes: 0.0,
            recorded_snapshots: Vec::new(),
        })
    }

    /// Runs one round: generate outages, score them, snapshot, then move the satellites.
    pub fn step(&mut self) -> Result<()> {
        let count = self.params.outages_per_round as usize;
        let outages = generate_outages(&self.grid, &mut self.rng, count)?;

        let mut ground_hits = 0u32;
        for outage in &outages {
            let outcome = evaluate_outage(
                &self.sensors,
                &self.fleet,
                outage,
                self.params.ground_decay_deg,
                &mut self.rng,
            );
            ground_hits += outcome.ground as u32;
            self.results.record(Detector::Ground, outcome.ground);
            for (profile, detected) in outcome.satellites {
                self.results.record(Detector::Satellite(profile), detected);
            }
        }

        self.current_round += 1;
        debug!(
            "Round {} scored {} outages ({} ground detections).",
            self.current_round, outages.len(), ground_hits
        );
        self.record_snapshot();

        // Positions are read during scoring above and written only here
        self.fleet.advance(self.params.minutes_per_round);
        self.elapsed_minutes += self.params.minutes_per_round;
        Ok(())
    }

    /// Runs every configured round that has not been run yet.
    pub fn run(&mut self) -> Result<()> {
        let total = self.params.rounds;
        while self.current_round < total {
            info!("Running simulation round {}/{}...", self.current_round + 1, total);
            self.step()?;
        }
        info!(
            "Simulation finished: {} rounds, {} outages scored per detector.",
            self.current_round,
            self.results.get(Detector::Ground).map_or(0, |r| r.trials())
        );
        Ok(())
    }

    /// Captures every detector's running statistics for the round just scored.
    fn record_snapshot(&mut self) {
        let snapshot = RoundSnapshot {
            round: self.current_round,
            elapsed_minutes: self.elapsed_minutes,
            detectors: self.results.stats(),
        };
        for stats in &snapshot.detectors {
            debug!(
                "  {:<26} {:>4}/{:<4} {:.2}%",
                stats.name, stats.successes, stats.trials, stats.accuracy * 100.0
            );
        }
        self.recorded_snapshots.push(snapshot);
    }

    pub fn results(&self) -> &ResultsAggregator {
        &self.results
    }

    pub fn grid(&self) -> &TerrainGrid {
        &self.grid
    }

    pub fn sensors(&self) -> &SensorNetwork {
        &self.sensors
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Provides access to the simulation parameters.
    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Provides access to the original simulation configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    /// Provides access to the recorded snapshots.
    pub fn get_recorded_snapshots(&self) -> &[RoundSnapshot] {
        &self.recorded_snapshots
    }

    /// Packages the final results and round history for export.
    pub fn run_summary(&self) -> RunSummary {
        RunSummary {
            seed: self.params.seed,
            rounds: self.current_round,
            outages_per_round: self.params.outages_per_round,
            ground_sensor_count: self.sensors.len(),
            detectors: self.results.summaries(),
            snapshots: self.get_recorded_snapshots().to_vec(),
        }
    }
}
