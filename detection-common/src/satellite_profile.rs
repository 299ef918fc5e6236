use serde::{Deserialize, Serialize};
use crate::terrain::TerrainCategory;

/// Coverage radius floor in grid degrees, before the altitude bonus.
pub const BASE_COVERAGE_DEG: f64 = 50.0;
/// Planar degree distance that already spans the whole grid.
pub const MAX_COVERAGE_DEG: f64 = 180.0;
/// Above this altitude terrain sensitivity is damped toward 1.0.
pub const HIGH_ALTITUDE_KM: f64 = 10_000.0;

/// Constellation type. Declaration order is the evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SatelliteProfile {
    Leo400,
    Leo800,
    Meo2000,
    Meo10000,
    HeoMolniya,
    Geo35786,
}

/// Fixed performance and fleet parameters of a satellite profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSpec {
    pub base_accuracy: f64,
    pub altitude_km: f64,
    pub orbit_period_min: f64,
    /// Fleet size required for global coverage.
    pub global_coverage: usize,
    pub description: &'static str,
}

impl SatelliteProfile {
    pub const ALL: [SatelliteProfile; 6] = [
        SatelliteProfile::Leo400,
        SatelliteProfile::Leo800,
        SatelliteProfile::Meo2000,
        SatelliteProfile::Meo10000,
        SatelliteProfile::HeoMolniya,
        SatelliteProfile::Geo35786,
    ];

    pub const fn spec(self) -> ProfileSpec {
        match self {
            SatelliteProfile::Leo400 => ProfileSpec {
                base_accuracy: 0.847,
                altitude_km: 400.0,
                orbit_period_min: 90.0,
                global_coverage: 180,
                description: "LEO 400km (VIIRS-like)",
            },
            SatelliteProfile::Leo800 => ProfileSpec {
                base_accuracy: 0.876,
                altitude_km: 800.0,
                orbit_period_min: 100.0,
                global_coverage: 150,
                description: "LEO 800km (Landsat-like)",
            },
            SatelliteProfile::Meo2000 => ProfileSpec {
                base_accuracy: 0.892,
                altitude_km: 2000.0,
                orbit_period_min: 120.0,
                global_coverage: 90,
                description: "MEO 2000km",
            },
            SatelliteProfile::Meo10000 => ProfileSpec {
                base_accuracy: 0.915,
                altitude_km: 10_000.0,
                orbit_period_min: 360.0,
                global_coverage: 45,
                description: "MEO 10000km",
            },
            // 12-hour eccentric orbit
            SatelliteProfile::HeoMolniya => ProfileSpec {
                base_accuracy: 0.883,
                altitude_km: 26_560.0,
                orbit_period_min: 720.0,
                global_coverage: 12,
                description: "HEO Molniya",
            },
            SatelliteProfile::Geo35786 => ProfileSpec {
                base_accuracy: 0.932,
                altitude_km: 35_786.0,
                orbit_period_min: 1440.0,
                global_coverage: 3,
                description: "GEO 35786km (GOES-like)",
            },
        }
    }

    pub fn description(self) -> &'static str {
        self.spec().description
    }

    /// True for the profile whose ground track dwells at high latitude.
    pub fn is_eccentric(self) -> bool {
        matches!(self, SatelliteProfile::HeoMolniya)
    }

    /// Eastward drift in degrees of longitude per simulated minute.
    pub fn angular_speed_deg_per_min(self) -> f64 {
        360.0 / self.spec().orbit_period_min
    }

    pub fn coverage_radius_deg(self) -> f64 {
        coverage_radius_deg(self.spec().altitude_km)
    }

    /// Satellite detection multiplier for an outage on `terrain`.
    pub fn terrain_factor(self, terrain: TerrainCategory) -> f64 {
        let raw = terrain.satellite_factor();
        if self.spec().altitude_km > HIGH_ALTITUDE_KM {
            0.8 + 0.2 * raw
        } else {
            raw
        }
    }

    pub fn from_description(description: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.description() == description)
    }
}

/// Maximum planar degree distance at which a satellite at `altitude_km` sees an outage.
pub fn coverage_radius_deg(altitude_km: f64) -> f64 {
    (BASE_COVERAGE_DEG + altitude_km / 1000.0).min(MAX_COVERAGE_DEG)
}
