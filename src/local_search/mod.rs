//! Local search operators that refine an existing tour.
//!
//! Operators never modify their input; they return a new tour that is at
//! least as short.
//!
//! - [`two_opt_improve`]: 2-opt segment reversal (Croes, 1958)

mod two_opt;

pub use two_opt::two_opt_improve;
