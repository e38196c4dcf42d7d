//! Exact solvers that guarantee a global optimum below their node ceiling.
//!
//! - [`brute_force`]: full permutation enumeration, O(n!)
//! - [`held_karp`]: bitmask dynamic programming (Held & Karp, 1962), O(n²2ⁿ)

mod brute_force;
mod held_karp;

pub use brute_force::{brute_force, BRUTE_FORCE_MAX_NODES};
pub use held_karp::{held_karp, HELD_KARP_MAX_NODES};
