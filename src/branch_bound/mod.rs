//! Branch-and-bound exact search.
//!
//! Best-first search over partial tours, pruned with an admissible
//! [`LowerBound`] and capped by a node ceiling and an expansion budget.
//!
//! # Reference
//!
//! Little, J.D.C., Murty, K.G., Sweeney, D.W. & Karel, C. (1963). "An
//! algorithm for the traveling salesman problem", *Operations Research*
//! 11(6), 972-989.

mod bound;
mod solver;

pub use bound::LowerBound;
pub use solver::{BnbOutcome, BranchAndBound, SearchStats, BNB_MAX_ITERATIONS, BNB_MAX_NODES};
