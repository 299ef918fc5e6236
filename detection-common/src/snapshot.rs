use serde::{Serialize, Deserialize};

/// Running statistics of one detector at a point in the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorStats {
    pub name: String,
    pub trials: u32,
    pub successes: u32,
    pub accuracy: f64,
}

/// Per-detector statistics captured after a round has been scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// One-based round number.
    pub round: u32,
    /// Simulated minutes elapsed before this round's satellite advance.
    pub elapsed_minutes: f64,
    /// Detectors in evaluation order: ground first, then each satellite profile.
    pub detectors: Vec<DetectorStats>,
}

/// Final result of one detector, the outward contract of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorSummary {
    pub name: String,
    pub total_trials: u32,
    pub successes: u32,
    pub accuracy: f64,
    /// Every individual outcome in the order it was scored.
    pub outcomes: Vec<bool>,
}

/// Everything a run exports: final summaries plus the per-round history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub rounds: u32,
    pub outages_per_round: u32,
    pub ground_sensor_count: usize,
    pub detectors: Vec<DetectorSummary>,
    pub snapshots: Vec<RoundSnapshot>,
}
