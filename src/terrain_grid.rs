use detection_common::{SimParams, TerrainCategory};
use log::{debug, info};
use rand::prelude::*;

// Simulated ocean basin carved out of the random land mix (exclusive bounds)
const OCEAN_LON_BAND: (usize, usize) = (140, 160);
const OCEAN_LAT_BAND: (usize, usize) = (20, 50);

/// Latitude/longitude matrix with one terrain category per integer degree.
/// Row-major: `cells[lat * width + lon]`.
#[derive(Debug, Clone)]
pub struct TerrainGrid {
    height: usize,
    width: usize,
    cells: Vec<TerrainCategory>,
}

impl TerrainGrid {
    /// Generates the grid, scanning latitude-major and longitude-minor.
    /// Every cell consumes exactly one draw, including cells the polar or ocean rules decide.
    pub fn generate(params: &SimParams, rng: &mut StdRng) -> Self {
        let height = params.grid_height;
        let width = params.grid_width;
        let mut cells = Vec::with_capacity(height * width);
        let mut random_cells = 0usize;

        for lat in 0..height {
            for lon in 0..width {
                let u = rng.random::<f64>();
                let terrain = match fixed_terrain(lat, lon, params) {
                    Some(terrain) => terrain,
                    None => {
                        random_cells += 1;
                        TerrainCategory::from_unit_draw(u)
                    }
                };
                cells.push(terrain);
            }
        }

        let grid = TerrainGrid { height, width, cells };
        info!("Generated {}x{} terrain grid ({} random cells).", height, width, random_cells);
        debug!("Terrain mix: {:?}", grid.terrain_counts());
        grid
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Calculates the 1D cell index, clamping out-of-range coordinates to the grid edge.
    #[inline(always)]
    pub fn cell_idx(&self, lat: usize, lon: usize) -> usize {
        let clamped_lat = lat.min(self.height - 1);
        let clamped_lon = lon.min(self.width - 1);
        clamped_lat * self.width + clamped_lon
    }

    #[inline(always)]
    pub fn terrain_at(&self, lat: usize, lon: usize) -> TerrainCategory {
        self.cells[self.cell_idx(lat, lon)]
    }

    /// Number of cells per category, in category declaration order.
    pub fn terrain_counts(&self) -> Vec<(TerrainCategory, usize)> {
        TerrainCategory::ALL
            .iter()
            .map(|&category| {
                let count = self.cells.iter().filter(|&&c| c == category).count();
                (category, count)
            })
            .collect()
    }
}

/// Terrain imposed by geography rather than by the random mix.
fn fixed_terrain(lat: usize, lon: usize, params: &SimParams) -> Option<TerrainCategory> {
    if params.equator_offset(lat).abs() > params.polar_cutoff_deg {
        return Some(TerrainCategory::Arctic);
    }
    let in_lon_band = lon > OCEAN_LON_BAND.0 && lon < OCEAN_LON_BAND.1;
    let in_lat_band = lat > OCEAN_LAT_BAND.0 && lat < OCEAN_LAT_BAND.1;
    if in_lon_band && in_lat_band {
        return Some(TerrainCategory::Ocean);
    }
    None
}
