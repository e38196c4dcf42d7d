//! Distance functions and the dense cost matrix.
//!
//! Provides the Euclidean and haversine base metrics and the row-major
//! matrix every solver reads edge weights from.

mod matrix;
mod metric;

pub use matrix::CostMatrix;
pub use metric::{euclidean, haversine, MetricSpace, EARTH_RADIUS_M};
