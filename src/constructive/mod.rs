//! Constructive heuristics for building tours quickly.
//!
//! - [`nearest_neighbor`]: Greedy nearest-neighbor, optionally importance-weighted, O(n²)

mod nearest_neighbor;

pub use nearest_neighbor::nearest_neighbor;
