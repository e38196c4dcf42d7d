//! Aggregate tour metrics and the scoring policy.

use serde::{Deserialize, Serialize};

use super::model::{travel_time, DRIVER_COST_PER_HOUR};
use crate::error::{Result, SolveError};
use crate::graph::Graph;
use crate::models::{Conditions, Tour};

/// Weights of the normalized score terms.
///
/// Each term is normalized to a natural unit (km, minutes, currency,
/// liters) before weighting so the defaults stay comparable across
/// instance sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// Weight per km.
    pub distance_weight: f64,
    /// Weight per minute.
    pub time_weight: f64,
    /// Weight per currency unit.
    pub cost_weight: f64,
    /// Weight per liter (or kWh).
    pub fuel_weight: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            distance_weight: 0.4,
            time_weight: 0.3,
            cost_weight: 0.2,
            fuel_weight: 0.1,
        }
    }
}

impl ScoringPolicy {
    /// `(1 + Σ weight·term) * traffic_impact * weather_impact`.
    ///
    /// The leading `1` keeps the score strictly positive for zero-length tours.
    pub fn score(&self, m: &Metrics) -> f64 {
        let weighted = self.distance_weight * m.distance / 1000.0
            + self.time_weight * m.time / 60.0
            + self.cost_weight * m.cost
            + self.fuel_weight * m.fuel;
        (1.0 + weighted) * m.traffic_impact * m.weather_impact
    }
}

/// Metrics derived from a tour, a graph and the request conditions.
///
/// Units: `distance` meters, `time` seconds, `cost` currency,
/// `fuel` liters or kWh. Lower `total_score` is better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub distance: f64,
    pub time: f64,
    pub cost: f64,
    pub fuel: f64,
    pub traffic_impact: f64,
    pub weather_impact: f64,
    pub total_score: f64,
}

impl Metrics {
    /// All-zero metrics carried by failed results.
    pub fn zero() -> Self {
        Self {
            distance: 0.0,
            time: 0.0,
            cost: 0.0,
            fuel: 0.0,
            traffic_impact: 0.0,
            weather_impact: 0.0,
            total_score: 0.0,
        }
    }

    /// Derives every metric from the two lengths of one tour.
    ///
    /// `distance` is the sum of edge weights (conditions included) and is
    /// reported as-is. `length` is the physical length of the same tour
    /// without condition factors; time, fuel and cost are computed from it
    /// so traffic and weather are applied exactly once.
    ///
    /// Fails with [`SolveError::NonFiniteMetric`] if any field would be
    /// NaN or infinite, e.g. when the tour uses a missing edge.
    pub fn from_lengths(
        distance: f64,
        length: f64,
        conditions: &Conditions,
        policy: &ScoringPolicy,
    ) -> Result<Self> {
        let vehicle = conditions.vehicle_profile();
        let km = length / 1000.0;
        let time = travel_time(length, conditions);
        let fuel = km * vehicle.fuel_rate_per_km;
        let cost = km * vehicle.cost_per_km
            + fuel * vehicle.energy_price
            + time / 3600.0 * DRIVER_COST_PER_HOUR;

        let mut metrics = Self {
            distance,
            time,
            cost,
            fuel,
            traffic_impact: conditions.traffic_factor(),
            weather_impact: conditions.weather_time_factor(),
            total_score: 0.0,
        };
        metrics.total_score = policy.score(&metrics);
        metrics.ensure_finite()?;
        Ok(metrics)
    }

    fn ensure_finite(&self) -> Result<()> {
        let fields = [
            ("distance", self.distance),
            ("time", self.time),
            ("cost", self.cost),
            ("fuel", self.fuel),
            ("trafficImpact", self.traffic_impact),
            ("weatherImpact", self.weather_impact),
            ("totalScore", self.total_score),
        ];
        match fields.iter().find(|(_, v)| !v.is_finite()) {
            Some(&(metric, _)) => Err(SolveError::NonFiniteMetric { metric }),
            None => Ok(()),
        }
    }
}

/// Metrics of a closed index path over `graph`.
pub fn path_metrics(
    path: &[usize],
    graph: &Graph,
    conditions: &Conditions,
    policy: &ScoringPolicy,
) -> Result<Metrics> {
    Metrics::from_lengths(
        graph.costs().tour_cost(path),
        graph.lengths().tour_cost(path),
        conditions,
        policy,
    )
}

/// Metrics of `tour` under the default scoring policy.
///
/// # Examples
///
/// ```
/// use u_tsp::graph::Graph;
/// use u_tsp::models::{Conditions, Node, Tour};
/// use u_tsp::cost::tour_metrics;
///
/// let nodes = vec![Node::new("a", 0.0, 0.0), Node::new("b", 3.0, 4.0)];
/// let graph = Graph::build(nodes, &Conditions::new()).unwrap();
/// let tour = Tour::new(vec!["a".into(), "b".into(), "a".into()]);
/// let m = tour_metrics(&tour, &graph, &Conditions::new()).unwrap();
/// assert!((m.distance - 10.0).abs() < 1e-10);
/// ```
pub fn tour_metrics(tour: &Tour, graph: &Graph, conditions: &Conditions) -> Result<Metrics> {
    tour_metrics_with(tour, graph, conditions, &ScoringPolicy::default())
}

/// Metrics of `tour` under an explicit scoring policy.
pub fn tour_metrics_with(
    tour: &Tour,
    graph: &Graph,
    conditions: &Conditions,
    policy: &ScoringPolicy,
) -> Result<Metrics> {
    let path = tour
        .ids()
        .iter()
        .map(|id| {
            graph
                .index_of(id)
                .ok_or_else(|| SolveError::invalid_input(format!("tour visits unknown node `{id}`")))
        })
        .collect::<Result<Vec<_>>>()?;
    path_metrics(&path, graph, conditions, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::BASE_SPEED_MPS;
    use crate::models::{Node, TimeOfDay, VehicleKind, Weather};

    #[test]
    fn test_uniform_car_metrics() {
        let policy = ScoringPolicy::default();
        let m = Metrics::from_lengths(10_000.0, 10_000.0, &Conditions::new(), &policy)
            .expect("finite");
        assert_eq!(m.distance, 10_000.0);
        // 10 km at 50 km/h = 720 s
        assert!((m.time - 720.0).abs() < 1e-9);
        assert!((m.fuel - 0.8).abs() < 1e-12);
        let expected_cost = 10.0 * 0.12 + 0.8 * 1.6 + 0.2 * 20.0;
        assert!((m.cost - expected_cost).abs() < 1e-9);
        assert_eq!(m.traffic_impact, 1.0);
        assert_eq!(m.weather_impact, 1.0);
        let expected_score = 1.0 + 0.4 * 10.0 + 0.3 * 12.0 + 0.2 * expected_cost + 0.1 * 0.8;
        assert!((m.total_score - expected_score).abs() < 1e-9);
    }

    #[test]
    fn test_zero_distance_score_positive() {
        let m = Metrics::from_lengths(0.0, 0.0, &Conditions::new(), &ScoringPolicy::default())
            .expect("finite");
        assert!(m.total_score > 0.0);
        assert_eq!(m.cost, 0.0);
    }

    #[test]
    fn test_bad_conditions_score_worse() {
        let policy = ScoringPolicy::default();
        let calm =
            Metrics::from_lengths(5_000.0, 5_000.0, &Conditions::new(), &policy).expect("finite");
        let storm = Conditions::new()
            .with_weather(Weather::Snowy)
            .with_time_of_day(TimeOfDay::Morning);
        let bad = Metrics::from_lengths(5_000.0, 5_000.0, &storm, &policy).expect("finite");
        assert!(bad.time > calm.time);
        assert!(bad.total_score > calm.total_score);
        assert!((bad.weather_impact - 1.8).abs() < 1e-12);
        assert!((bad.traffic_impact - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_truck_costs_more_than_bike() {
        let policy = ScoringPolicy::default();
        let bike = Conditions::new().with_vehicle(VehicleKind::Bike);
        let truck = Conditions::new().with_vehicle(VehicleKind::Truck);
        let b = Metrics::from_lengths(20_000.0, 20_000.0, &bike, &policy).expect("finite");
        let t = Metrics::from_lengths(20_000.0, 20_000.0, &truck, &policy).expect("finite");
        assert!(t.cost > b.cost);
        assert!(t.time > b.time);
        assert!(t.fuel > b.fuel);
    }

    #[test]
    fn test_infinite_distance_rejected() {
        let policy = ScoringPolicy::default();
        let err = Metrics::from_lengths(f64::INFINITY, f64::INFINITY, &Conditions::new(), &policy)
            .expect_err("must fail");
        assert_eq!(err, SolveError::NonFiniteMetric { metric: "distance" });
    }

    #[test]
    fn test_conditions_counted_once_in_time() {
        for (time_of_day, traffic) in [(TimeOfDay::Morning, 1.4), (TimeOfDay::Night, 0.9)] {
            let conditions = Conditions::new().with_time_of_day(time_of_day);
            let graph = Graph::build(
                vec![Node::new("a", 0.0, 0.0), Node::new("b", 1000.0, 0.0)],
                &conditions,
            )
            .expect("valid");
            let m = path_metrics(&[0, 1, 0], &graph, &conditions, &ScoringPolicy::default())
                .expect("finite");
            assert!((m.distance - 2000.0 * traffic).abs() < 1e-9);
            assert!((m.time - 2000.0 / BASE_SPEED_MPS * traffic).abs() < 1e-9);
            // fuel follows the physical length, not the weighted one
            assert!((m.fuel - 2.0 * 0.08).abs() < 1e-12);
        }
    }

    #[test]
    fn test_weather_time_factor_only() {
        let snowy = Conditions::new().with_weather(Weather::Snowy);
        let graph = Graph::build(
            vec![Node::new("a", 0.0, 0.0), Node::new("b", 500.0, 0.0)],
            &snowy,
        )
        .expect("valid");
        let m = tour_metrics(
            &Tour::new(vec!["a".into(), "b".into(), "a".into()]),
            &graph,
            &snowy,
        )
        .expect("finite");
        assert!((m.distance - 1000.0 * 1.6).abs() < 1e-9);
        assert!((m.time - 1000.0 / BASE_SPEED_MPS * 1.8).abs() < 1e-9);
    }

    #[test]
    fn test_tour_metrics_unknown_node() {
        let graph = Graph::build(
            vec![Node::new("a", 0.0, 0.0), Node::new("b", 1.0, 0.0)],
            &Conditions::new(),
        )
        .expect("valid");
        let tour = Tour::new(vec!["a".into(), "z".into(), "a".into()]);
        assert!(matches!(
            tour_metrics(&tour, &graph, &Conditions::new()),
            Err(SolveError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_wire_field_names() {
        let m = Metrics::from_lengths(1.0, 1.0, &Conditions::new(), &ScoringPolicy::default())
            .expect("finite");
        let json = serde_json::to_value(m).expect("serializes");
        for key in [
            "distance",
            "time",
            "cost",
            "fuel",
            "trafficImpact",
            "weatherImpact",
            "totalScore",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
