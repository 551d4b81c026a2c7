//! Great-circle distance and congestion-adjusted travel time.
//!
//! Distances are analytic (spherical Earth, no road network), so they are
//! always available and fully deterministic.

use crate::config::EngineConfig;
use crate::traits::DistanceMatrixProvider;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometers.
pub fn great_circle_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Driving minutes between two points at the given hour of day.
///
/// `hour_of_day` is expected in `0..=23`; out-of-range values are not
/// wrapped and simply match whichever band their numeric value falls in.
pub fn travel_minutes(
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
    hour_of_day: u32,
    config: &EngineConfig,
) -> i32 {
    let km = great_circle_distance_km(lat1, lon1, lat2, lon2);
    let effective_speed = config.average_speed_kmh / config.congestion_multiplier(hour_of_day);
    let hours = km / effective_speed;
    (hours * 60.0).round() as i32
}

/// Matrix provider backed by [`travel_minutes`].
#[derive(Debug, Clone, Default)]
pub struct HaversineMatrix {
    config: EngineConfig,
}

impl HaversineMatrix {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }
}

impl DistanceMatrixProvider for HaversineMatrix {
    fn matrix_for(&self, locations: &[(f64, f64)], hour_of_day: u32) -> Vec<Vec<i32>> {
        let n = locations.len();
        let mut matrix = vec![vec![0; n]; n];

        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                if i != j {
                    matrix[i][j] = travel_minutes(from.0, from.1, to.0, to.1, hour_of_day, &self.config);
                }
            }
        }

        matrix
    }
}
