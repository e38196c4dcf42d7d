//! # u-tsp
//!
//! Multi-algorithm travelling salesman engine for small graphs. Edge
//! weights come from geometry adjusted for weather, traffic, road type and
//! vehicle; four solvers (brute force, Held-Karp, nearest-neighbor and
//! branch-and-bound) share one dispatcher that falls back to
//! nearest-neighbor when an exact solver cannot answer and reports that
//! substitution on the result.
//!
//! ## Modules
//!
//! - [`models`]: nodes, conditions, tours and the solve result
//! - [`distance`]: base metrics and the cost matrix
//! - [`graph`]: immutable weighted graph and its builder
//! - [`cost`]: edge weights and tour metrics
//! - [`exact`]: brute force and Held-Karp
//! - [`branch_bound`]: best-first branch-and-bound
//! - [`constructive`]: nearest-neighbor construction
//! - [`local_search`]: 2-opt refinement
//! - [`dispatch`]: `solve`, `solve_nodes`, `compare` and [`SolverConfig`]
//!
//! ## Example
//!
//! ```
//! use u_tsp::{solve_nodes, SolverConfig};
//! use u_tsp::models::{AlgorithmKind, Conditions, Node, TimeOfDay, Weather};
//!
//! let nodes = vec![
//!     Node::new("depot", 0.0, 0.0),
//!     Node::new("a", 1000.0, 0.0),
//!     Node::new("b", 1000.0, 1000.0),
//!     Node::new("c", 0.0, 1000.0),
//! ];
//! let conditions = Conditions::new()
//!     .with_weather(Weather::Rainy)
//!     .with_time_of_day(TimeOfDay::Morning);
//! let result = solve_nodes(
//!     AlgorithmKind::BranchAndBound,
//!     nodes,
//!     "depot",
//!     &conditions,
//!     &SolverConfig::default(),
//! )
//! .unwrap();
//! assert!(result.tour.is_closed());
//! assert!(result.metrics.total_score > 0.0);
//! ```

pub mod branch_bound;
pub mod constructive;
pub mod cost;
pub mod dispatch;
pub mod distance;
pub mod error;
pub mod exact;
pub mod graph;
pub mod local_search;
pub mod models;

pub use dispatch::{compare, solve, solve_nodes, SolverConfig};
pub use error::{Result, SolveError};
