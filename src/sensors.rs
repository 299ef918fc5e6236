use crate::terrain_grid::TerrainGrid;
use detection_common::{GeoPoint, SimParams, TerrainCategory};
use log::{debug, info, warn};
use rand::prelude::*;
use std::collections::BTreeMap;
use std::fmt;

/// Identifies a ground sensor by the grid cell it occupies.
/// Ordering is latitude-major, which fixes the tie-break in nearest-sensor lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SensorId {
    pub lat: usize,
    pub lon: usize,
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GS_{}_{}", self.lat, self.lon)
    }
}

/// A fixed point sensor; its accuracy is its terrain's base accuracy.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundSensor {
    pub id: SensorId,
    pub terrain: TerrainCategory,
    pub accuracy: f64,
}

impl GroundSensor {
    pub fn new(lat: usize, lon: usize, terrain: TerrainCategory) -> Self {
        GroundSensor {
            id: SensorId { lat, lon },
            terrain,
            accuracy: terrain.sensor_accuracy(),
        }
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::from_cell(self.id.lat, self.id.lon)
    }
}

/// The deployed ground network, keyed by sensor id.
#[derive(Debug, Clone, Default)]
pub struct SensorNetwork {
    sensors: BTreeMap<SensorId, GroundSensor>,
}

impl SensorNetwork {
    /// Visits every `sensor_stride`-th cell on both axes and draws once per candidate;
    /// a sensor is placed when the draw falls below the terrain's deployment probability.
    pub fn deploy(grid: &TerrainGrid, params: &SimParams, rng: &mut StdRng) -> Self {
        let stride = params.sensor_stride.max(1);
        let mut network = SensorNetwork::default();
        let mut candidates = 0usize;

        for lat in (0..grid.height()).step_by(stride) {
            for lon in (0..grid.width()).step_by(stride) {
                candidates += 1;
                let terrain = grid.terrain_at(lat, lon);
                if rng.random::<f64>() < terrain.deployment_probability() {
                    network.insert(GroundSensor::new(lat, lon, terrain));
                }
            }
        }

        info!("Deployed {} ground sensors globally ({} candidate sites).", network.len(), candidates);
        if network.is_empty() {
            warn!("Ground sensor network is empty; every ground trial will be a non-detection.");
        }
        debug!("Sensors per terrain: {:?}", network.terrain_counts());
        network
    }

    /// Builds a network from explicit sensors, replacing duplicates by id.
    #[cfg(test)]
    pub fn from_sensors<I: IntoIterator<Item = GroundSensor>>(sensors: I) -> Self {
        let mut network = SensorNetwork::default();
        for sensor in sensors {
            network.insert(sensor);
        }
        network
    }

    fn insert(&mut self, sensor: GroundSensor) {
        self.sensors.insert(sensor.id, sensor);
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroundSensor> {
        self.sensors.values()
    }

    /// Finds the closest sensor by planar distance. The first minimum in id order wins ties.
    pub fn nearest(&self, point: GeoPoint) -> Option<(&GroundSensor, f64)> {
        let mut best: Option<(&GroundSensor, f64)> = None;
        for sensor in self.sensors.values() {
            let dist_sq = sensor.position().distance_squared(point);
            match best {
                Some((_, best_sq)) if dist_sq >= best_sq => {}
                _ => best = Some((sensor, dist_sq)),
            }
        }
        best.map(|(sensor, dist_sq)| (sensor, dist_sq.sqrt()))
    }

    fn terrain_counts(&self) -> Vec<(TerrainCategory, usize)> {
        TerrainCategory::ALL
            .iter()
            .map(|&t| (t, self.iter().filter(|s| s.terrain == t).count()))
            .filter(|(_, n)| *n > 0)
            .collect()
    }
}
