use crate::results::Detector;
use crate::simulation::OutageSimulation;
use anyhow::Result;
use detection_common::{DetectorSummary, SimulationConfig};
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Accuracy spread of one detector across independent runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchDetectorStats {
    pub name: String,
    pub runs: u32,
    pub total_trials: u64,
    pub mean_accuracy: f64,
    pub min_accuracy: f64,
    pub max_accuracy: f64,
}

/// Per-run summaries, kept in seed order, plus the aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub seeds: Vec<u64>,
    pub per_run: Vec<Vec<DetectorSummary>>,
    pub detectors: Vec<BatchDetectorStats>,
}

/// Runs `runs` independent simulations with seeds `seed, seed + 1, ...` in parallel.
/// Each simulation owns its own stream, so the result does not depend on scheduling.
pub fn run_batch(config: &SimulationConfig, runs: u32) -> Result<BatchResult> {
    if runs == 0 {
        anyhow::bail!("A batch needs at least one run.");
    }
    let base_seed = config.simulation.seed;
    let seeds: Vec<u64> = (0..runs as u64).map(|i| base_seed.wrapping_add(i)).collect();
    info!("Running batch of {} simulations on {} Rayon threads.", runs, rayon::current_num_threads());

    let per_run = seeds
        .par_iter()
        .map(|&seed| -> Result<Vec<DetectorSummary>> {
            let mut run_config = config.clone();
            run_config.simulation.seed = seed;
            let mut sim = OutageSimulation::new(run_config)?;
            sim.run()?;
            Ok(sim.results().summaries())
        })
        .collect::<Result<Vec<_>>>()?;

    let detectors = aggregate(&per_run);
    Ok(BatchResult { seeds, per_run, detectors })
}

fn aggregate(per_run: &[Vec<DetectorSummary>]) -> Vec<BatchDetectorStats> {
    Detector::all()
        .map(|detector| {
            let name = detector.name();
            let accuracies: Vec<(f64, u32)> = per_run
                .iter()
                .filter_map(|run| run.iter().find(|s| s.name == name))
                .map(|s| (s.accuracy, s.total_trials))
                .collect();
            let runs = accuracies.len() as u32;
            if runs == 0 {
                return BatchDetectorStats {
                    name: name.to_string(),
                    runs: 0,
                    total_trials: 0,
                    mean_accuracy: 0.0,
                    min_accuracy: 0.0,
                    max_accuracy: 0.0,
                };
            }
            BatchDetectorStats {
                name: name.to_string(),
                runs,
                total_trials: accuracies.iter().map(|(_, t)| *t as u64).sum(),
                mean_accuracy: accuracies.iter().map(|(a, _)| a).sum::<f64>() / runs as f64,
                min_accuracy: accuracies.iter().map(|(a, _)| *a).fold(f64::INFINITY, f64::min),
                max_accuracy: accuracies.iter().map(|(a, _)| *a).fold(f64::NEG_INFINITY, f64::max),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.simulation.rounds = 2;
        config.simulation.outages_per_round = 10;
        config
    }

    #[test]
    fn batch_runs_match_sequential_runs() {
        let config = small_config();
        let batch = run_batch(&config, 3).unwrap();
        assert_eq!(batch.seeds, vec![12345, 12346, 12347]);
        for (seed, summaries) in batch.seeds.iter().zip(&batch.per_run) {
            let mut single = config.clone();
            single.simulation.seed = *seed;
            let mut sim = OutageSimulation::new(single).unwrap();
            sim.run().unwrap();
            assert_eq!(&sim.results().summaries(), summaries);
        }
    }

    #[test]
    fn aggregate_bounds_mean() {
        let batch = run_batch(&small_config(), 4).unwrap();
        assert_eq!(batch.detectors.len(), 7);
        for stats in &batch.detectors {
            assert_eq!(stats.runs, 4);
            assert_eq!(stats.total_trials, 4 * 20);
            assert!(stats.min_accuracy <= stats.mean_accuracy + 1e-12);
            assert!(stats.mean_accuracy <= stats.max_accuracy + 1e-12);
        }
    }

    #[test]
    fn single_run_batch_equals_run() {
        let batch = run_batch(&small_config(), 1).unwrap();
        for (stats, summary) in batch.detectors.iter().zip(&batch.per_run[0]) {
            assert_eq!(stats.mean_accuracy, summary.accuracy);
            assert_eq!(stats.min_accuracy, summary.accuracy);
            assert_eq!(stats.max_accuracy, summary.accuracy);
        }
    }

    #[test]
    fn zero_runs_is_an_error() {
        assert!(run_batch(&small_config(), 0).is_err());
    }
}
