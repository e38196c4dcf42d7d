//! Entry points: pick a solver, fall back when it cannot answer, and
//! attach metrics.
//!
//! Every call owns its graph view, search frontier and DP tables for its
//! duration; nothing is cached between calls, so independent calls can run
//! on separate threads without synchronization.

mod comparison;
mod config;
mod dispatcher;

pub use comparison::{compare, Comparison, ComparisonEntry};
pub use config::SolverConfig;
pub use dispatcher::{solve, solve_nodes};
