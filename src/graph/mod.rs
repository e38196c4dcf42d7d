//! Graph model: nodes plus a dense, condition-weighted cost matrix.

#[allow(clippy::module_inception)]
mod graph;

pub use graph::{Graph, GraphBuilder, Jitter};
