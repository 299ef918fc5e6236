use serde::{Deserialize, Serialize};

/// Surface class assigned to every grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TerrainCategory {
    Urban,
    Suburban,
    Rural,
    Forest,
    Mountain,
    Desert,
    Ocean,
    Arctic,
}

/// Fixed coefficients attached to a terrain category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainCoefficients {
    /// Base accuracy of a ground sensor sited on this terrain.
    pub sensor_accuracy: f64,
    /// Chance that a stride candidate on this terrain receives a sensor.
    pub deployment_probability: f64,
    /// Raw multiplier applied to satellite detection over this terrain.
    pub satellite_factor: f64,
    pub label: &'static str,
}

impl TerrainCategory {
    pub const ALL: [TerrainCategory; 8] = [
        TerrainCategory::Urban,
        TerrainCategory::Suburban,
        TerrainCategory::Rural,
        TerrainCategory::Forest,
        TerrainCategory::Mountain,
        TerrainCategory::Desert,
        TerrainCategory::Ocean,
        TerrainCategory::Arctic,
    ];

    pub const fn coefficients(self) -> TerrainCoefficients {
        match self {
            // Smart grid SCADA coverage in cities; night-light interference from orbit
            TerrainCategory::Urban => TerrainCoefficients {
                sensor_accuracy: 0.934,
                deployment_probability: 0.95,
                satellite_factor: 0.95,
                label: "Urban/City",
            },
            TerrainCategory::Suburban => TerrainCoefficients {
                sensor_accuracy: 0.912,
                deployment_probability: 0.80,
                satellite_factor: 1.0,
                label: "Suburban",
            },
            TerrainCategory::Rural => TerrainCoefficients {
                sensor_accuracy: 0.856,
                deployment_probability: 0.60,
                satellite_factor: 1.05,
                label: "Rural",
            },
            // Canopy interference
            TerrainCategory::Forest => TerrainCoefficients {
                sensor_accuracy: 0.798,
                deployment_probability: 0.30,
                satellite_factor: 0.85,
                label: "Forest",
            },
            // Line-of-sight problems on the ground, shadowing from orbit
            TerrainCategory::Mountain => TerrainCoefficients {
                sensor_accuracy: 0.743,
                deployment_probability: 0.25,
                satellite_factor: 0.80,
                label: "Mountain",
            },
            TerrainCategory::Desert => TerrainCoefficients {
                sensor_accuracy: 0.821,
                deployment_probability: 0.20,
                satellite_factor: 1.10,
                label: "Desert",
            },
            TerrainCategory::Ocean => TerrainCoefficients {
                sensor_accuracy: 0.623,
                deployment_probability: 0.05,
                satellite_factor: 0.70,
                label: "Ocean",
            },
            TerrainCategory::Arctic => TerrainCoefficients {
                sensor_accuracy: 0.687,
                deployment_probability: 0.10,
                satellite_factor: 0.75,
                label: "Arctic",
            },
        }
    }

    pub fn sensor_accuracy(self) -> f64 {
        self.coefficients().sensor_accuracy
    }

    pub fn deployment_probability(self) -> f64 {
        self.coefficients().deployment_probability
    }

    pub fn satellite_factor(self) -> f64 {
        self.coefficients().satellite_factor
    }

    pub fn label(self) -> &'static str {
        self.coefficients().label
    }

    /// Maps a uniform draw in [0, 1) onto the synthetic land mix.
    pub fn from_unit_draw(u: f64) -> Self {
        if u < 0.15 {
            TerrainCategory::Urban
        } else if u < 0.30 {
            TerrainCategory::Suburban
        } else if u < 0.50 {
            TerrainCategory::Rural
        } else if u < 0.65 {
            TerrainCategory::Forest
        } else if u < 0.75 {
            TerrainCategory::Mountain
        } else if u < 0.85 {
            TerrainCategory::Desert
        } else {
            TerrainCategory::Ocean
        }
    }
}
