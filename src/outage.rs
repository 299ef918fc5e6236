use crate::terrain_grid::TerrainGrid;
use anyhow::Result;
use detection_common::{GeoPoint, TerrainCategory};
use rand::distr::Uniform;
use rand::prelude::*;

/// A power outage to be scored in the current round only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outage {
    pub lat: usize,
    pub lon: usize,
    pub terrain: TerrainCategory,
}

impl Outage {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::from_cell(self.lat, self.lon)
    }
}

/// Draws `count` independent outages uniformly over the grid.
/// Each outage consumes a latitude draw followed by a longitude draw.
pub fn generate_outages(grid: &TerrainGrid, rng: &mut StdRng, count: usize) -> Result<Vec<Outage>> {
    let lat_dist = Uniform::new(0, grid.height())?;
    let lon_dist = Uniform::new(0, grid.width())?;

    let mut outages = Vec::with_capacity(count);
    for _ in 0..count {
        let lat = rng.sample(&lat_dist);
        let lon = rng.sample(&lon_dist);
        outages.push(Outage { lat, lon, terrain: grid.terrain_at(lat, lon) });
    }
    Ok(outages)
}
