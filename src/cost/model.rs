//! Edge weighting from distance, road type and conditions.

use crate::models::{Conditions, RoadType};

/// Free-flow speed behind the raw travel time, 50 km/h in m/s.
pub const BASE_SPEED_MPS: f64 = 50.0 / 3.6;

/// Driver wage per hour of travel.
pub const DRIVER_COST_PER_HOUR: f64 = 20.0;

/// Weight of an edge of `distance` meters on the default road type.
///
/// # Examples
///
/// ```
/// use u_tsp::cost::edge_cost;
/// use u_tsp::models::{Conditions, Weather};
///
/// assert_eq!(edge_cost(100.0, &Conditions::new()), 100.0);
/// let snowy = Conditions::new().with_weather(Weather::Snowy);
/// assert!((edge_cost(100.0, &snowy) - 160.0).abs() < 1e-9);
/// ```
pub fn edge_cost(distance: f64, conditions: &Conditions) -> f64 {
    road_edge_cost(distance, RoadType::default(), conditions)
}

/// `distance * road_factor * traffic_factor * weather_factor`.
///
/// The vehicle does not change edge weights; it only enters the metrics.
pub fn road_edge_cost(distance: f64, road: RoadType, conditions: &Conditions) -> f64 {
    distance * road.factor() * conditions.traffic_factor() * conditions.weather_cost_factor()
}

/// Travel time in seconds for `distance` meters under `conditions`.
///
/// `raw_time * weather_mult * time_of_day_mult / speed_factor`.
pub fn travel_time(distance: f64, conditions: &Conditions) -> f64 {
    let raw = distance / BASE_SPEED_MPS;
    raw * conditions.weather_time_factor() * conditions.traffic_factor()
        / conditions.vehicle_profile().speed_factor
}
