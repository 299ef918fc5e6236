use serde::{Deserialize, Serialize};

/// Simulation parameters derived from the configuration, used frequently during simulation rounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimParams {
    // Terrain grid (one cell per integer degree)
    pub grid_height: usize, // Latitude rows, row 90 is the equator
    pub grid_width: usize,  // Longitude columns
    pub polar_cutoff_deg: f64, // Cells further than this from the equator are Arctic

    // Ground network
    pub sensor_stride: usize,
    pub ground_decay_deg: f64, // Exponential falloff constant for ground detection

    // Run
    pub seed: u64,
    pub rounds: u32,
    pub outages_per_round: u32,
    pub minutes_per_round: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        SimParams {
            grid_height: 180,
            grid_width: 360,
            polar_cutoff_deg: 75.0,
            sensor_stride: 5,
            ground_decay_deg: 10.0,
            seed: 12345,
            rounds: 5,
            outages_per_round: 50,
            minutes_per_round: 60.0,
        }
    }
}

impl SimParams {
    /// Signed offset of a grid row from the equator row.
    pub fn equator_offset(&self, lat: usize) -> f64 {
        lat as f64 - (self.grid_height / 2) as f64
    }
}
