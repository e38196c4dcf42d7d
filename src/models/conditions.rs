//! Environmental conditions and the per-condition multipliers.
//!
//! All multipliers are fixed policy constants; the same inputs always give
//! the same weights.

use serde::{Deserialize, Serialize};

/// Weather during the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Sunny,
    Rainy,
    Foggy,
    Snowy,
    Windy,
}

impl Weather {
    /// Multiplier applied to edge weights.
    pub fn cost_factor(self) -> f64 {
        match self {
            Weather::Sunny => 1.0,
            Weather::Rainy => 1.3,
            Weather::Foggy => 1.3,
            Weather::Snowy => 1.6,
            Weather::Windy => 1.1,
        }
    }

    /// Multiplier applied to travel time.
    pub fn time_factor(self) -> f64 {
        match self {
            Weather::Sunny => 1.0,
            Weather::Rainy => 1.5,
            Weather::Foggy => 1.4,
            Weather::Snowy => 1.8,
            Weather::Windy => 1.1,
        }
    }
}

/// Departure time bucket, used as a traffic proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Traffic multiplier (morning and evening peaks, quiet nights).
    pub fn traffic_factor(self) -> f64 {
        match self {
            TimeOfDay::Morning => 1.4,
            TimeOfDay::Afternoon => 1.0,
            TimeOfDay::Evening => 1.3,
            TimeOfDay::Night => 0.9,
        }
    }
}

/// Vehicle used for the tour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Bike,
    #[default]
    Car,
    Truck,
    Ev,
}

impl VehicleKind {
    /// Operating profile for this vehicle.
    pub fn profile(self) -> VehicleProfile {
        match self {
            VehicleKind::Bike => VehicleProfile {
                speed_factor: 1.15,
                fuel_rate_per_km: 0.03,
                cost_per_km: 0.05,
                energy_price: 1.6,
            },
            VehicleKind::Car => VehicleProfile {
                speed_factor: 1.0,
                fuel_rate_per_km: 0.08,
                cost_per_km: 0.12,
                energy_price: 1.6,
            },
            VehicleKind::Truck => VehicleProfile {
                speed_factor: 0.75,
                fuel_rate_per_km: 0.30,
                cost_per_km: 0.45,
                energy_price: 1.5,
            },
            // kWh per km, price per kWh
            VehicleKind::Ev => VehicleProfile {
                speed_factor: 1.0,
                fuel_rate_per_km: 0.15,
                cost_per_km: 0.08,
                energy_price: 0.25,
            },
        }
    }
}

/// Speed and running-cost parameters of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleProfile {
    /// Speed relative to a car (`> 1` is faster).
    pub speed_factor: f64,
    /// Liters (or kWh) consumed per km.
    pub fuel_rate_per_km: f64,
    /// Wear and maintenance cost per km.
    pub cost_per_km: f64,
    /// Price of one unit of fuel or energy.
    pub energy_price: f64,
}

/// Road classification of an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadType {
    Highway,
    #[default]
    Urban,
    Residential,
    Rural,
    Unpaved,
}

impl RoadType {
    pub fn factor(self) -> f64 {
        match self {
            RoadType::Highway => 0.85,
            RoadType::Urban => 1.0,
            RoadType::Residential => 1.15,
            RoadType::Rural => 1.1,
            RoadType::Unpaved => 1.4,
        }
    }
}

/// Per-request environmental conditions.
///
/// Every field is optional; an unset field contributes a factor of `1.0`
/// (and the car profile for `vehicle`).
///
/// # Examples
///
/// ```
/// use u_tsp::models::{Conditions, Weather, TimeOfDay};
///
/// let c = Conditions::new()
///     .with_weather(Weather::Rainy)
///     .with_time_of_day(TimeOfDay::Morning);
/// assert!((c.traffic_factor() - 1.4).abs() < 1e-12);
/// assert!((Conditions::new().weather_cost_factor() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<VehicleKind>,
}

impl Conditions {
    /// Uniform conditions: every factor is `1.0`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weather(mut self, weather: Weather) -> Self {
        self.weather = Some(weather);
        self
    }

    pub fn with_time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = Some(time_of_day);
        self
    }

    pub fn with_vehicle(mut self, vehicle: VehicleKind) -> Self {
        self.vehicle = Some(vehicle);
        self
    }

    pub fn weather_cost_factor(&self) -> f64 {
        self.weather.map_or(1.0, Weather::cost_factor)
    }

    pub fn weather_time_factor(&self) -> f64 {
        self.weather.map_or(1.0, Weather::time_factor)
    }

    pub fn traffic_factor(&self) -> f64 {
        self.time_of_day.map_or(1.0, TimeOfDay::traffic_factor)
    }

    /// Profile of the configured vehicle, car when unset.
    pub fn vehicle_profile(&self) -> VehicleProfile {
        self.vehicle.unwrap_or_default().profile()
    }
}
