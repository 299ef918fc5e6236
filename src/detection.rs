use crate::constellation::{Constellation, Fleet};
use crate::outage::Outage;
use crate::sensors::SensorNetwork;
use detection_common::SatelliteProfile;
use log::trace;
use rand::prelude::*;

/// Outcome of one outage against every detector.
#[derive(Debug, Clone, PartialEq)]
pub struct OutageOutcome {
    pub ground: bool,
    /// One entry per constellation, in profile order.
    pub satellites: Vec<(SatelliteProfile, bool)>,
}

/// Probability that a sensor of `accuracy` registers an outage `distance` degrees away.
#[inline(always)]
pub fn ground_detection_probability(accuracy: f64, distance: f64, decay_deg: f64) -> f64 {
    accuracy * (-distance / decay_deg).exp()
}

/// Scores an outage against the nearest ground sensor.
/// An empty network is a non-detection and consumes no draw.
pub fn evaluate_ground(network: &SensorNetwork, outage: &Outage, decay_deg: f64, rng: &mut StdRng) -> bool {
    let Some((sensor, distance)) = network.nearest(outage.position()) else {
        return false;
    };
    let probability = ground_detection_probability(sensor.accuracy, distance, decay_deg);
    let detected = rng.random::<f64>() < probability;
    trace!(
        "Ground: outage ({}, {}) nearest {} at {:.2} deg, p={:.4}, detected={}",
        outage.lat, outage.lon, sensor.id, distance, probability, detected
    );
    detected
}

/// Scores an outage against one constellation.
///
/// Satellites are tried in slot order. Each satellite whose coverage contains the
/// outage gets one draw against `accuracy * terrain_factor`; the first success
/// ends the evaluation, so later satellites consume no draws.
pub fn evaluate_constellation(constellation: &Constellation, outage: &Outage, rng: &mut StdRng) -> bool {
    let profile = constellation.profile();
    let terrain_factor = profile.terrain_factor(outage.terrain);
    let target = outage.position();

    for satellite in constellation.satellites() {
        if !satellite.can_detect(target) {
            continue;
        }
        let probability = satellite.accuracy * terrain_factor;
        if rng.random::<f64>() < probability {
            trace!(
                "{}: outage ({}, {}) detected by slot {} (p={:.4})",
                profile.description(), outage.lat, outage.lon, satellite.slot, probability
            );
            return true;
        }
    }
    false
}

/// Scores one outage against the ground network, then every constellation in profile order.
pub fn evaluate_outage(
    network: &SensorNetwork,
    fleet: &Fleet,
    outage: &Outage,
    decay_deg: f64,
    rng: &mut StdRng,
) -> OutageOutcome {
    let ground = evaluate_ground(network, outage, decay_deg, rng);
    let satellites = fleet
        .iter()
        .map(|constellation| (constellation.profile(), evaluate_constellation(constellation, outage, rng)))
        .collect();
    OutageOutcome { ground, satellites }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constellation::{within_coverage, Satellite};
    use crate::outage::generate_outages;
    use crate::sensors::GroundSensor;
    use crate::terrain_grid::TerrainGrid;
    use detection_common::satellite_profile::MAX_COVERAGE_DEG;
    use detection_common::{GeoPoint, SimParams, TerrainCategory};

    fn outage(lat: usize, lon: usize, terrain: TerrainCategory) -> Outage {
        Outage { lat, lon, terrain }
    }

    fn satellite(profile: SatelliteProfile, slot: usize, lat: f64, lon: f64, accuracy: f64) -> Satellite {
        Satellite { profile, slot, position: GeoPoint::new(lat, lon), accuracy }
    }

    #[test]
    fn ground_probability_at_zero_distance_is_sensor_accuracy() {
        assert_eq!(ground_detection_probability(0.934, 0.0, 10.0), 0.934);
    }

    #[test]
    fn ground_probability_decreases_with_distance() {
        let mut previous = f64::INFINITY;
        for step in 0..200 {
            let p = ground_detection_probability(0.856, step as f64 * 0.5, 10.0);
            assert!(p < previous);
            assert!(p > 0.0);
            previous = p;
        }
        let ten = ground_detection_probability(1.0, 10.0, 10.0);
        assert!((ten - (-1.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn empty_network_never_detects_and_draws_nothing() {
        let network = SensorNetwork::default();
        let mut rng = StdRng::seed_from_u64(9);
        let mut untouched = rng.clone();
        assert!(!evaluate_ground(&network, &outage(90, 90, TerrainCategory::Urban), 10.0, &mut rng));
        assert_eq!(rng.random::<u64>(), untouched.random::<u64>());
    }

    #[test]
    fn ground_detection_matches_single_draw() {
        let network = SensorNetwork::from_sensors(vec![GroundSensor::new(40, 40, TerrainCategory::Urban)]);
        let target = outage(43, 44, TerrainCategory::Rural);
        let p = ground_detection_probability(0.934, 5.0, 10.0);
        for seed in 0..50u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut replay = rng.clone();
            let detected = evaluate_ground(&network, &target, 10.0, &mut rng);
            assert_eq!(detected, replay.random::<f64>() < p);
        }
    }

    #[test]
    fn first_satellite_success_short_circuits() {
        let constellation = Constellation::from_satellites(
            SatelliteProfile::Leo400,
            vec![
                satellite(SatelliteProfile::Leo400, 0, 90.0, 10.0, 1.0),
                satellite(SatelliteProfile::Leo400, 1, 90.0, 20.0, 1.0),
                satellite(SatelliteProfile::Leo400, 2, 90.0, 30.0, 1.0),
            ],
        );
        // Suburban factor is 1.0, so the first in-range satellite always succeeds
        let target = outage(90, 20, TerrainCategory::Suburban);
        let mut rng = StdRng::seed_from_u64(21);
        let mut replay = rng.clone();
        assert!(evaluate_constellation(&constellation, &target, &mut rng));
        let _ = replay.random::<f64>();
        assert_eq!(rng.random::<u64>(), replay.random::<u64>());
    }

    #[test]
    fn out_of_range_satellites_draw_nothing() {
        let constellation = Constellation::from_satellites(
            SatelliteProfile::Leo400,
            vec![satellite(SatelliteProfile::Leo400, 0, -90.0, 300.0, 1.0)],
        );
        let mut rng = StdRng::seed_from_u64(4);
        let mut untouched = rng.clone();
        assert!(!evaluate_constellation(&constellation, &outage(90, 10, TerrainCategory::Urban), &mut rng));
        assert_eq!(rng.random::<u64>(), untouched.random::<u64>());
    }

    #[test]
    fn every_in_range_satellite_draws_until_success() {
        let constellation = Constellation::from_satellites(
            SatelliteProfile::Geo35786,
            vec![
                satellite(SatelliteProfile::Geo35786, 0, 90.0, 0.0, 0.5),
                satellite(SatelliteProfile::Geo35786, 1, -90.0, 300.0, 0.5), // out of range
                satellite(SatelliteProfile::Geo35786, 2, 90.0, 40.0, 0.5),
            ],
        );
        let target = outage(100, 20, TerrainCategory::Ocean);
        let p = 0.5 * SatelliteProfile::Geo35786.terrain_factor(TerrainCategory::Ocean);
        for seed in 0..50u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut replay = rng.clone();
            let detected = evaluate_constellation(&constellation, &target, &mut rng);
            let expected = replay.random::<f64>() < p || replay.random::<f64>() < p;
            assert_eq!(detected, expected, "seed {seed}");
            assert_eq!(rng.random::<u64>(), replay.random::<u64>(), "seed {seed}");
        }
    }

    #[test]
    fn capped_radius_admits_every_outage_of_a_round() {
        let mut rng = StdRng::seed_from_u64(12345);
        let grid = TerrainGrid::generate(&SimParams::default(), &mut rng);
        let outages = generate_outages(&grid, &mut rng, 50).unwrap();
        let positions = [GeoPoint::new(90.0, 0.0), GeoPoint::new(90.0, 120.0), GeoPoint::new(90.0, 240.0)];
        for o in &outages {
            assert!(
                positions.iter().any(|&p| within_coverage(p, o.position(), MAX_COVERAGE_DEG)),
                "outage ({}, {}) outside every footprint",
                o.lat, o.lon
            );
        }
    }

    #[test]
    fn outcome_lists_every_profile_in_order() {
        let mut rng = StdRng::seed_from_u64(12345);
        let params = SimParams::default();
        let grid = TerrainGrid::generate(&params, &mut rng);
        let network = SensorNetwork::deploy(&grid, &params, &mut rng);
        let fleet = Fleet::deploy(&mut rng);
        let target = outage(90, 180, grid.terrain_at(90, 180));
        let result = evaluate_outage(&network, &fleet, &target, params.ground_decay_deg, &mut rng);
        let profiles: Vec<_> = result.satellites.iter().map(|(p, _)| *p).collect();
        assert_eq!(profiles, SatelliteProfile::ALL.to_vec());
    }
}
