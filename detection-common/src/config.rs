use serde::{Deserialize, Serialize};
use anyhow::Result;
use crate::sim_params::SimParams;
use std::path::Path;

// Run-length and seeding settings for a single simulation
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SimulationSettings {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    #[serde(default = "default_outages_per_round")]
    pub outages_per_round: u32,
    #[serde(default = "default_minutes_per_round")]
    pub minutes_per_round: f64, // Orbital advance applied after every round
}

// Settings for running several independent simulations with consecutive seeds
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BatchConfig {
    #[serde(default = "default_runs")]
    pub runs: u32,
}

// Configuration for output settings, loaded from config.toml
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_base_filename")]
    pub base_filename: String,
    #[serde(default)]
    pub save_summary: bool,
    #[serde(default)]
    pub save_outcomes_csv: bool,
    pub format: Option<String>, // Output format: "json", "bincode", "messagepack"
}

// Main simulation configuration structure, loaded from config.toml.
// Every section may be omitted; omitted values fall back to the reference run.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SimulationConfig {
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            seed: default_seed(),
            rounds: default_rounds(),
            outages_per_round: default_outages_per_round(),
            minutes_per_round: default_minutes_per_round(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig { runs: default_runs() }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            base_filename: default_base_filename(),
            save_summary: false,
            save_outcomes_csv: false,
            format: None,
        }
    }
}

impl SimulationConfig {
    /// Loads the simulation configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path_ref.display(), e))?;
        let config: SimulationConfig = toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML from '{}': {}", path_ref.display(), e))?;

        config.validate()?;
        Ok(config)
    }

    /// Checks the ranges the simulation loop relies on.
    pub fn validate(&self) -> Result<()> {
        if self.simulation.rounds == 0 {
            anyhow::bail!("rounds must be greater than 0.");
        }
        if self.simulation.outages_per_round == 0 {
            anyhow::bail!("outages_per_round must be greater than 0.");
        }
        if !self.simulation.minutes_per_round.is_finite() || self.simulation.minutes_per_round < 0.0 {
            anyhow::bail!(
                "minutes_per_round must be a finite, non-negative number (got {}).",
                self.simulation.minutes_per_round
            );
        }
        if self.batch.runs == 0 {
            anyhow::bail!("batch.runs must be greater than 0.");
        }
        Ok(())
    }

    /// Converts the configuration into simulation parameters used at runtime.
    pub fn get_sim_params(&self) -> SimParams {
        SimParams {
            seed: self.simulation.seed,
            rounds: self.simulation.rounds,
            outages_per_round: self.simulation.outages_per_round,
            minutes_per_round: self.simulation.minutes_per_round,
            ..SimParams::default()
        }
    }
}

fn default_seed() -> u64 {
    12345
}

fn default_rounds() -> u32 {
    5
}

fn default_outages_per_round() -> u32 {
    50
}

fn default_minutes_per_round() -> f64 {
    60.0 // One hour of orbital motion per round
}

fn default_runs() -> u32 {
    1
}

fn default_base_filename() -> String {
    "outage_detection".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_file_yields_reference_run() {
        let file = write_config("");
        let config = SimulationConfig::load(file.path()).unwrap();
        assert_eq!(config.simulation.seed, 12345);
        assert_eq!(config.simulation.rounds, 5);
        assert_eq!(config.simulation.outages_per_round, 50);
        assert_eq!(config.simulation.minutes_per_round, 60.0);
        assert_eq!(config.batch.runs, 1);
        assert!(!config.output.save_summary);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let file = write_config(
            "[simulation]\nrounds = 12\n\n[output]\nsave_summary = true\nformat = \"bincode\"\n",
        );
        let config = SimulationConfig::load(file.path()).unwrap();
        assert_eq!(config.simulation.rounds, 12);
        assert_eq!(config.simulation.seed, 12345);
        assert!(config.output.save_summary);
        assert_eq!(config.output.format.as_deref(), Some("bincode"));
        assert_eq!(config.output.base_filename, "outage_detection");
    }

    #[test]
    fn zero_rounds_is_rejected() {
        let file = write_config("[simulation]\nrounds = 0\n");
        let err = SimulationConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("rounds"));
    }

    #[test]
    fn negative_step_is_rejected() {
        let mut config = SimulationConfig::default();
        config.simulation.minutes_per_round = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SimulationConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn sim_params_carry_run_settings() {
        let mut config = SimulationConfig::default();
        config.simulation.seed = 7;
        config.simulation.outages_per_round = 3;
        let params = config.get_sim_params();
        assert_eq!(params.seed, 7);
        assert_eq!(params.outages_per_round, 3);
        assert_eq!(params.grid_height, 180);
        assert_eq!(params.grid_width, 360);
    }
}
