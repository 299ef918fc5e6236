pub mod config;
pub mod geometry;
pub mod satellite_profile;
pub mod sim_params;
pub mod snapshot;
pub mod terrain;

// Re-export key types for easier use by dependent crates
pub use config::{SimulationConfig, SimulationSettings, BatchConfig, OutputConfig};
pub use geometry::{GeoPoint, wrap_longitude};
pub use satellite_profile::{SatelliteProfile, ProfileSpec, coverage_radius_deg};
pub use sim_params::SimParams;
pub use snapshot::{DetectorStats, DetectorSummary, RoundSnapshot, RunSummary};
pub use terrain::{TerrainCategory, TerrainCoefficients};
