use detection_common::{DetectorStats, DetectorSummary, SatelliteProfile};
use std::collections::BTreeMap;

pub const GROUND_DETECTOR_NAME: &str = "Ground Sensors";

/// A detection method being compared. Ordering puts ground first, then profiles in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Detector {
    Ground,
    Satellite(SatelliteProfile),
}

impl Detector {
    /// Ground first, then every satellite profile.
    pub fn all() -> impl Iterator<Item = Detector> {
        std::iter::once(Detector::Ground).chain(SatelliteProfile::ALL.into_iter().map(Detector::Satellite))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Detector::Ground => GROUND_DETECTOR_NAME,
            Detector::Satellite(profile) => profile.description(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        if name == GROUND_DETECTOR_NAME {
            Some(Detector::Ground)
        } else {
            SatelliteProfile::from_description(name).map(Detector::Satellite)
        }
    }
}

/// Running outcome counters for one detector. Accuracy is always derived from the counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionRecord {
    trials: u32,
    successes: u32,
    outcomes: Vec<bool>,
}

impl DetectionRecord {
    pub fn add_result(&mut self, detected: bool) {
        self.trials += 1;
        if detected {
            self.successes += 1;
        }
        self.outcomes.push(detected);
    }

    pub fn trials(&self) -> u32 {
        self.trials
    }

    pub fn successes(&self) -> u32 {
        self.successes
    }

    pub fn outcomes(&self) -> &[bool] {
        &self.outcomes
    }

    /// Success ratio; zero before the first trial.
    pub fn accuracy(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.successes as f64 / self.trials as f64
        }
    }
}

/// Per-detector records for a whole run.
#[derive(Debug, Clone)]
pub struct ResultsAggregator {
    records: BTreeMap<Detector, DetectionRecord>,
}

impl Default for ResultsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsAggregator {
    /// Starts with an empty record for every detector so all of them report, even with zero trials.
    pub fn new() -> Self {
        let records = Detector::all().map(|d| (d, DetectionRecord::default())).collect();
        ResultsAggregator { records }
    }

    pub fn record(&mut self, detector: Detector, detected: bool) {
        self.records.entry(detector).or_default().add_result(detected);
    }

    pub fn get(&self, detector: Detector) -> Option<&DetectionRecord> {
        self.records.get(&detector)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Detector, &DetectionRecord)> {
        self.records.iter().map(|(d, r)| (*d, r))
    }

    pub fn stats(&self) -> Vec<DetectorStats> {
        self.iter()
            .map(|(detector, record)| DetectorStats {
                name: detector.name().to_string(),
                trials: record.trials(),
                successes: record.successes(),
                accuracy: record.accuracy(),
            })
            .collect()
    }

    /// Final per-detector results in detector order.
    pub fn summaries(&self) -> Vec<DetectorSummary> {
        self.iter()
            .map(|(detector, record)| DetectorSummary {
                name: detector.name().to_string(),
                total_trials: record.trials(),
                successes: record.successes(),
                accuracy: record.accuracy(),
                outcomes: record.outcomes().to_vec(),
            })
            .collect()
    }
}
