use crate::batch::BatchResult;
use anyhow::Result;
use detection_common::{OutputConfig, RunSummary};
use log::{info, warn};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Serialization format for the exported run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Bincode,
    MessagePack,
}

impl OutputFormat {
    /// Parses the configured format name. Unknown names fall back to JSON.
    pub fn from_config(name: Option<&str>) -> Self {
        match name.unwrap_or("json") {
            "json" => OutputFormat::Json,
            "bincode" => OutputFormat::Bincode,
            "messagepack" => OutputFormat::MessagePack,
            other => {
                warn!("Unknown output format: {}. Using JSON instead.", other);
                OutputFormat::Json
            }
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Bincode => "bin",
            OutputFormat::MessagePack => "msgpack",
        }
    }
}

/// Writes the run summary into `dir` as `<base>_summary.<ext>` and returns the path.
pub fn save_summary(summary: &RunSummary, output: &OutputConfig, dir: &Path) -> Result<PathBuf> {
    let filename = write_serialized(summary, output, dir, "summary")?;
    info!("Run summary saved to {}", filename.display());
    Ok(filename)
}

/// Writes batch results into `dir` as `<base>_batch.<ext>` and returns the path.
pub fn save_batch(result: &BatchResult, output: &OutputConfig, dir: &Path) -> Result<PathBuf> {
    let filename = write_serialized(result, output, dir, "batch")?;
    info!("Batch results saved to {}", filename.display());
    Ok(filename)
}

fn write_serialized<T: Serialize>(value: &T, output: &OutputConfig, dir: &Path, suffix: &str) -> Result<PathBuf> {
    let format = OutputFormat::from_config(output.format.as_deref());
    let filename = dir.join(format!("{}_{}.{}", output.base_filename, suffix, format.extension()));
    let file = File::create(&filename)
        .map_err(|e| anyhow::anyhow!("Error creating {} file '{}': {}", suffix, filename.display(), e))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Json => serde_json::to_writer(&mut writer, value)
            .map_err(|e| anyhow::anyhow!("Error serializing {} to JSON: {}", suffix, e))?,
        OutputFormat::Bincode => bincode::serialize_into(&mut writer, value)
            .map_err(|e| anyhow::anyhow!("Error serializing {} to bincode: {}", suffix, e))?,
        OutputFormat::MessagePack => rmp_serde::encode::write(&mut writer, value)
            .map_err(|e| anyhow::anyhow!("Error serializing {} to MessagePack: {}", suffix, e))?,
    }
    writer.flush()?;
    Ok(filename)
}

/// Writes every individual outcome as `detector,trial,detected` rows.
pub fn save_outcomes_csv(summary: &RunSummary, output: &OutputConfig, dir: &Path) -> Result<PathBuf> {
    let filename = dir.join(format!("{}_outcomes.csv", output.base_filename));
    let mut writer = csv::Writer::from_path(&filename)
        .map_err(|e| anyhow::anyhow!("Error creating CSV file '{}': {}", filename.display(), e))?;

    writer.write_record(["detector", "trial", "detected"])?;
    for detector in &summary.detectors {
        for (trial, detected) in detector.outcomes.iter().enumerate() {
            let trial_number = (trial + 1).to_string();
            writer.write_record([
                detector.name.as_str(),
                trial_number.as_str(),
                if *detected { "1" } else { "0" },
            ])?;
        }
    }
    writer.flush()?;

    info!("Outcome sequences saved to {}", filename.display());
    Ok(filename)
}

/// Writes one `seed,detector,trials,successes,accuracy` row per run and detector.
pub fn save_batch_csv(result: &BatchResult, output: &OutputConfig, dir: &Path) -> Result<PathBuf> {
    let filename = dir.join(format!("{}_batch.csv", output.base_filename));
    let mut writer = csv::Writer::from_path(&filename)
        .map_err(|e| anyhow::anyhow!("Error creating CSV file '{}': {}", filename.display(), e))?;

    writer.write_record(["seed", "detector", "trials", "successes", "accuracy"])?;
    for (seed, summaries) in result.seeds.iter().zip(&result.per_run) {
        for summary in summaries {
            writer.write_record([
                seed.to_string(),
                summary.name.clone(),
                summary.total_trials.to_string(),
                summary.successes.to_string(),
                format!("{:.6}", summary.accuracy),
            ])?;
        }
    }
    writer.flush()?;

    info!("Per-run batch accuracies saved to {}", filename.display());
    Ok(filename)
}
