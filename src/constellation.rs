use detection_common::{wrap_longitude, GeoPoint, SatelliteProfile};
use log::{debug, info};
use rand::prelude::*;
use std::collections::BTreeMap;

/// Amplitude of the latitude swing of the eccentric profile, in degrees.
const ECCENTRIC_LAT_AMPLITUDE_DEG: f64 = 60.0;

/// A single orbiting detector.
#[derive(Debug, Clone, PartialEq)]
pub struct Satellite {
    pub profile: SatelliteProfile,
    /// Index within the constellation, fixed at deployment.
    pub slot: usize,
    pub position: GeoPoint,
    /// Per-instance accuracy, sampled once at creation.
    pub accuracy: f64,
}

impl Satellite {
    /// Places slot `slot` of `profile` and samples its accuracy jitter from `rng`.
    /// Latitudes cycle through -90..=80 in steps of 10; longitudes are evenly spaced.
    pub fn deploy(profile: SatelliteProfile, slot: usize, rng: &mut StdRng) -> Self {
        let spec = profile.spec();
        let jitter = 0.95 + 0.1 * rng.random::<f64>();
        let lat = ((slot % 18) as f64 - 9.0) * 10.0;
        let lon = (360.0 / spec.global_coverage as f64) * slot as f64;
        Satellite {
            profile,
            slot,
            position: GeoPoint::new(lat, lon),
            accuracy: spec.base_accuracy * jitter,
        }
    }

    /// True when `target` lies inside this satellite's coverage radius.
    pub fn can_detect(&self, target: GeoPoint) -> bool {
        within_coverage(self.position, target, self.profile.coverage_radius_deg())
    }

    /// Drifts the satellite eastward by `minutes` of orbital motion.
    pub fn advance(&mut self, minutes: f64) {
        let drift = self.profile.angular_speed_deg_per_min() * minutes;
        self.position.lon = wrap_longitude(self.position.lon + drift);
        if self.profile.is_eccentric() {
            self.position.lat = ECCENTRIC_LAT_AMPLITUDE_DEG * (2.0 * self.position.lon).to_radians().sin();
        }
    }
}

/// Coverage gate shared by every profile: planar distance no greater than `radius_deg`.
#[inline(always)]
pub fn within_coverage(satellite: GeoPoint, target: GeoPoint, radius_deg: f64) -> bool {
    satellite.distance_squared(target) <= radius_deg * radius_deg
}

/// Every satellite of one profile, in slot order.
#[derive(Debug, Clone)]
pub struct Constellation {
    profile: SatelliteProfile,
    satellites: Vec<Satellite>,
}

impl Constellation {
    /// Creates the full fleet the profile needs for global coverage.
    pub fn deploy(profile: SatelliteProfile, rng: &mut StdRng) -> Self {
        let fleet = profile.spec().global_coverage;
        let satellites = (0..fleet).map(|slot| Satellite::deploy(profile, slot, rng)).collect();
        Constellation { profile, satellites }
    }

    #[cfg(test)]
    pub fn from_satellites(profile: SatelliteProfile, satellites: Vec<Satellite>) -> Self {
        Constellation { profile, satellites }
    }

    pub fn profile(&self) -> SatelliteProfile {
        self.profile
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn advance(&mut self, minutes: f64) {
        for satellite in &mut self.satellites {
            satellite.advance(minutes);
        }
    }
}

/// All constellations, keyed by profile. Iteration follows profile declaration order.
#[derive(Debug, Clone, Default)]
pub struct Fleet {
    constellations: BTreeMap<SatelliteProfile, Constellation>,
}

impl Fleet {
    /// Deploys every profile in declaration order from the shared stream.
    pub fn deploy(rng: &mut StdRng) -> Self {
        let mut fleet = Fleet::default();
        for profile in SatelliteProfile::ALL {
            let constellation = Constellation::deploy(profile, rng);
            info!("Deployed {} {} satellites.", constellation.len(), profile.description());
            fleet.insert(constellation);
        }
        fleet
    }

    pub fn insert(&mut self, constellation: Constellation) {
        self.constellations.insert(constellation.profile(), constellation);
    }

    #[cfg(test)]
    pub fn get(&self, profile: SatelliteProfile) -> Option<&Constellation> {
        self.constellations.get(&profile)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constellation> {
        self.constellations.values()
    }

    pub fn total_satellites(&self) -> usize {
        self.constellations.values().map(Constellation::len).sum()
    }

    /// Advances every constellation by the same step.
    pub fn advance(&mut self, minutes: f64) {
        for constellation in self.constellations.values_mut() {
            constellation.advance(minutes);
        }
        debug!("Advanced {} satellites by {:.1} minutes.", self.total_satellites(), minutes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_profile_gets_its_full_fleet() {
        let mut rng = StdRng::seed_from_u64(12345);
        let fleet = Fleet::deploy(&mut rng);
        for profile in SatelliteProfile::ALL {
            let constellation = fleet.get(profile).unwrap();
            assert_eq!(constellation.len(), profile.spec().global_coverage);
            assert!(constellation.satellites().iter().all(|s| s.profile == profile));
        }
        assert_eq!(fleet.total_satellites(), 180 + 150 + 90 + 45 + 12 + 3);
        let order: Vec<_> = fleet.iter().map(|c| c.profile()).collect();
        assert_eq!(order, SatelliteProfile::ALL.to_vec());
    }

    #[test]
    fn accuracy_jitter_stays_within_five_percent_band() {
        let mut rng = StdRng::seed_from_u64(3);
        let fleet = Fleet::deploy(&mut rng);
        for constellation in fleet.iter() {
            let base = constellation.profile().spec().base_accuracy;
            for sat in constellation.satellites() {
                assert!(sat.accuracy >= 0.95 * base - 1e-12);
                assert!(sat.accuracy < 1.05 * base + 1e-12);
            }
        }
    }

    #[test]
    fn deployment_consumes_one_draw_per_satellite_in_profile_order() {
        let mut rng = StdRng::seed_from_u64(77);
        let mut replay = rng.clone();
        let fleet = Fleet::deploy(&mut rng);
        for profile in SatelliteProfile::ALL {
            let base = profile.spec().base_accuracy;
            for sat in fleet.get(profile).unwrap().satellites() {
                let expected = base * (0.95 + 0.1 * replay.random::<f64>());
                assert_eq!(sat.accuracy, expected);
            }
        }
        // Both streams must be at the same point afterwards
        assert_eq!(rng.random::<u64>(), replay.random::<u64>());
    }

    #[test]
    fn initial_positions_follow_slot_layout() {
        let mut rng = StdRng::seed_from_u64(1);
        let leo = Constellation::deploy(SatelliteProfile::Leo400, &mut rng);
        let sats = leo.satellites();
        assert_eq!(sats[0].position, GeoPoint::new(-90.0, 0.0));
        assert_eq!(sats[1].position, GeoPoint::new(-80.0, 2.0));
        assert_eq!(sats[17].position.lat, 80.0);
        assert_eq!(sats[18].position.lat, -90.0);
        assert_eq!(sats[18].position.lon, 36.0);

        let geo = Constellation::deploy(SatelliteProfile::Geo35786, &mut rng);
        let lons: Vec<f64> = geo.satellites().iter().map(|s| s.position.lon).collect();
        assert_eq!(lons, vec![0.0, 120.0, 240.0]);
    }

    #[test]
    fn advance_wraps_longitude_and_keeps_latitude() {
        let mut sat = Satellite {
            profile: SatelliteProfile::Leo400,
            slot: 0,
            position: GeoPoint::new(-30.0, 0.0),
            accuracy: 0.85,
        };
        sat.advance(60.0); // 4 degrees per minute
        assert_eq!(sat.position, GeoPoint::new(-30.0, 240.0));
        sat.advance(60.0);
        assert_eq!(sat.position, GeoPoint::new(-30.0, 120.0));
    }

    #[test]
    fn geostationary_drifts_fifteen_degrees_per_hour() {
        let mut sat = Satellite {
            profile: SatelliteProfile::Geo35786,
            slot: 2,
            position: GeoPoint::new(-70.0, 350.0),
            accuracy: 0.93,
        };
        sat.advance(60.0);
        assert!((sat.position.lon - 5.0).abs() < 1e-9);
        assert_eq!(sat.position.lat, -70.0);
    }

    #[test]
    fn eccentric_latitude_follows_longitude() {
        let mut sat = Satellite {
            profile: SatelliteProfile::HeoMolniya,
            slot: 0,
            position: GeoPoint::new(-90.0, 0.0),
            accuracy: 0.88,
        };
        sat.advance(60.0); // 0.5 degrees per minute
        assert!((sat.position.lon - 30.0).abs() < 1e-9);
        let expected = 60.0 * (60.0f64).to_radians().sin();
        assert!((sat.position.lat - expected).abs() < 1e-9);
    }

    #[test]
    fn zero_step_leaves_non_eccentric_positions_untouched() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut constellation = Constellation::deploy(SatelliteProfile::Meo2000, &mut rng);
        let before = constellation.satellites().to_vec();
        constellation.advance(0.0);
        assert_eq!(constellation.satellites(), before.as_slice());
    }

    #[test]
    fn coverage_gate_uses_profile_radius() {
        let sat = Satellite {
            profile: SatelliteProfile::Leo400,
            slot: 0,
            position: GeoPoint::new(0.0, 0.0),
            accuracy: 0.85,
        };
        // LEO 400 radius is 50.4 degrees
        assert!(sat.can_detect(GeoPoint::new(50.0, 0.0)));
        assert!(sat.can_detect(GeoPoint::new(30.0, 40.0)));
        assert!(!sat.can_detect(GeoPoint::new(40.0, 40.0)));
    }
}
