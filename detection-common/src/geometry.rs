use serde::{Deserialize, Serialize};

/// A position on the planar latitude/longitude grid, in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Creates a new GeoPoint.
    pub fn new(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }

    /// Creates a GeoPoint at the origin of a grid cell.
    pub fn from_cell(lat: usize, lon: usize) -> Self {
        GeoPoint { lat: lat as f64, lon: lon as f64 }
    }

    /// Calculates the squared planar distance to another point.
    pub fn distance_squared(&self, other: GeoPoint) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        dlat * dlat + dlon * dlon
    }

    /// Planar Euclidean distance in grid degrees. Longitude does not wrap.
    pub fn distance(&self, other: GeoPoint) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// Wraps a longitude into [0, 360).
pub fn wrap_longitude(lon: f64) -> f64 {
    let wrapped = lon.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
