//! Cost model: edge weights from conditions and aggregate tour metrics.
//!
//! - [`edge_cost`] / [`road_edge_cost`]: weight of one edge
//! - [`travel_time`]: seconds for a distance under conditions
//! - [`Metrics`] / [`tour_metrics`]: distance, time, cost, fuel and score of a tour
//! - [`ScoringPolicy`]: weights behind `totalScore`

mod metrics;
mod model;

pub use metrics::{path_metrics, tour_metrics, tour_metrics_with, Metrics, ScoringPolicy};
pub use model::{edge_cost, road_edge_cost, travel_time, BASE_SPEED_MPS, DRIVER_COST_PER_HOUR};
