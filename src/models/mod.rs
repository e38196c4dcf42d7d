//! Domain model types for TSP instances.
//!
//! Provides the value types that flow in and out of the engine: nodes with
//! optional significance attributes, environmental conditions, closed tours,
//! and the uniform solve result with its provenance tag.

mod conditions;
mod node;
mod result;
mod tour;

pub use conditions::{Conditions, RoadType, TimeOfDay, VehicleKind, VehicleProfile, Weather};
pub use node::{Node, NodeAttributes};
pub use result::{AlgorithmKind, Provenance, SolveResult, SubstitutionReason};
pub use tour::{IndexTour, Tour};
