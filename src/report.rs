use crate::results::{Detector, GROUND_DETECTOR_NAME};
use detection_common::{DetectorSummary, SatelliteProfile};

/// A satellite profile's accuracy relative to the ground network.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileComparison {
    pub profile: SatelliteProfile,
    pub accuracy: f64,
    /// Accuracy difference in percentage points; positive means better than ground.
    pub delta_pp: f64,
}

/// Comparative view of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub best: Detector,
    pub best_accuracy: f64,
    pub ground_accuracy: f64,
    pub comparisons: Vec<ProfileComparison>,
    /// Satellites the winning profile needs for global coverage; `None` when ground wins.
    pub winner_fleet_size: Option<usize>,
}

/// Ranks detectors. Ties keep the earlier detector, so ground wins an exact tie.
pub fn analyze(summaries: &[DetectorSummary]) -> Report {
    let ground_accuracy = summaries
        .iter()
        .find(|s| s.name == GROUND_DETECTOR_NAME)
        .map_or(0.0, |s| s.accuracy);

    let mut best = Detector::Ground;
    let mut best_accuracy = ground_accuracy;
    let mut comparisons = Vec::new();

    for summary in summaries {
        let Some(detector) = Detector::from_name(&summary.name) else {
            continue;
        };
        if summary.accuracy > best_accuracy {
            best = detector;
            best_accuracy = summary.accuracy;
        }
        if let Detector::Satellite(profile) = detector {
            comparisons.push(ProfileComparison {
                profile,
                accuracy: summary.accuracy,
                delta_pp: (summary.accuracy - ground_accuracy) * 100.0,
            });
        }
    }

    let winner_fleet_size = match best {
        Detector::Satellite(profile) => Some(profile.spec().global_coverage),
        Detector::Ground => None,
    };

    Report { best, best_accuracy, ground_accuracy, comparisons, winner_fleet_size }
}

/// Formats the results table and comparison for the console.
pub fn render(summaries: &[DetectorSummary], report: &Report) -> String {
    let mut lines = vec![
        "=== SIMULATION RESULTS ===".to_string(),
        format!("{:<26} {:<12} {:<12} {:<10}", "Detection Method", "Total Tests", "Successful", "Accuracy"),
        "-".repeat(62),
    ];
    for s in summaries {
        lines.push(format!(
            "{:<26} {:<12} {:<12} {:.2}%",
            s.name,
            s.total_trials,
            s.successes,
            s.accuracy * 100.0
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Best overall performer: {} ({:.2}% accuracy)",
        report.best.name(),
        report.best_accuracy * 100.0
    ));
    match report.best {
        Detector::Satellite(_) => lines.push(format!(
            "Outperformed ground sensors by {:.2} percentage points.",
            (report.best_accuracy - report.ground_accuracy) * 100.0
        )),
        Detector::Ground => lines.push("Ground-based sensors outperformed all satellite systems.".to_string()),
    }

    lines.push(String::new());
    lines.push("=== COMPARISON WITH GROUND SENSORS ===".to_string());
    for c in &report.comparisons {
        lines.push(format!(
            "{} vs Ground Sensors: {:+.2} percentage points",
            c.profile.description(),
            c.delta_pp
        ));
    }
    if let Some(fleet) = report.winner_fleet_size {
        lines.push(String::new());
        lines.push(format!("{} requires {} satellites for global coverage.", report.best.name(), fleet));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
