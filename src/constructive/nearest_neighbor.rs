//! Nearest-neighbor constructive heuristic.
//!
//! Builds the tour greedily: starting from the start node, always move to
//! the unvisited node with the lowest score, then return to the start.
//!
//! The score is the edge weight, optionally discounted for significant
//! nodes:
//!
//! ```text
//! score(k) = c(current, k) / (1 + importance_weight * significance(k))
//! ```
//!
//! With `importance_weight = 0` this is the plain nearest-neighbor rule.
//!
//! # Complexity
//!
//! O(n²) time, O(n) space.
//!
//! # Reference
//!
//! This is the simplest constructive heuristic for the TSP. While tour
//! quality is typically 15-25% above optimal, it never fails and provides
//! the fallback for every other solver.

use crate::graph::Graph;
use crate::models::IndexTour;

/// Constructs a closed tour from `start` using the nearest-neighbor rule.
///
/// Ties go to the lowest node index. Missing (infinite) edges are only
/// taken when nothing else remains, in which case the returned distance is
/// infinite and the caller must reject the tour.
///
/// # Panics
///
/// Panics if `start` is not a node index of `graph`.
///
/// # Examples
///
/// ```
/// use u_tsp::constructive::nearest_neighbor;
/// use u_tsp::graph::Graph;
/// use u_tsp::models::{Conditions, Node};
///
/// let nodes = vec![
///     Node::new("depot", 0.0, 0.0),
///     Node::new("a", 1.0, 0.0),
///     Node::new("b", 2.0, 0.0),
///     Node::new("c", 3.0, 0.0),
/// ];
/// let graph = Graph::build(nodes, &Conditions::new()).unwrap();
/// let tour = nearest_neighbor(&graph, 0, 0.0);
/// assert_eq!(tour.path, vec![0, 1, 2, 3, 0]);
/// assert!((tour.distance - 6.0).abs() < 1e-10);
/// ```
pub fn nearest_neighbor(graph: &Graph, start: usize, importance_weight: f64) -> IndexTour {
    let n = graph.len();
    let costs = graph.costs();
    let weight = if importance_weight.is_finite() {
        importance_weight.max(0.0)
    } else {
        0.0
    };
    let discount: Vec<f64> = graph
        .nodes()
        .iter()
        .map(|node| 1.0 + weight * node.significance())
        .collect();

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n + 1);
    let mut current = start;
    visited[start] = true;
    order.push(start);

    while order.len() < n {
        let mut best: Option<(usize, f64)> = None;
        for k in 0..n {
            if visited[k] {
                continue;
            }
            let score = costs.get(current, k) / discount[k];
            match best {
                Some((_, s)) if score >= s => {}
                _ => best = Some((k, score)),
            }
        }

        match best {
            Some((next, _)) => {
                visited[next] = true;
                order.push(next);
                current = next;
            }
            None => break,
        }
    }

    let tour = IndexTour::close(order, costs);
    log::debug!(
        "nearest neighbor: {n} nodes from {start}, distance {:.3}",
        tour.distance
    );
    tour
}
