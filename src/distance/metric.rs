//! Base distance functions.

use serde::{Deserialize, Serialize};

use crate::models::Node;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// How node coordinates are interpreted when measuring distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricSpace {
    /// Planar coordinates, distance in the coordinate unit (meters).
    #[default]
    Euclidean,
    /// `x = longitude`, `y = latitude` in degrees; great-circle meters.
    Haversine,
}

impl MetricSpace {
    /// Base (unweighted) distance between two nodes. Symmetric in both spaces.
    pub fn distance(self, a: &Node, b: &Node) -> f64 {
        match self {
            MetricSpace::Euclidean => euclidean(a.x(), a.y(), b.x(), b.y()),
            MetricSpace::Haversine => haversine(a.y(), a.x(), b.y(), b.x()),
        }
    }
}

pub fn euclidean(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x2 - x1).hypot(y2 - y1)
}

/// Great-circle distance in meters between two `(lat, lon)` points in degrees.
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // clamp guards against a drifting a few ulps above 1 for antipodes
    2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
}
