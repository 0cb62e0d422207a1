//! Coordinates and great-circle distance.
//!
//! Positions are WGS-84 latitude/longitude pairs in degrees; no datum
//! conversion is performed. Distance uses the haversine formula, which is
//! accurate to well under a meter at the sub-kilometer ranges hazard zones
//! operate at.

use serde::{Deserialize, Serialize};

/// Earth mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// A WGS-84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance between two coordinates in meters.
///
/// Inputs are not range-checked: callers guarantee |lat| <= 90 and
/// |lon| <= 180. Out-of-range values yield a mathematically defined but
/// physically meaningless distance, never an error.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}
