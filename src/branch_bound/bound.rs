//! Admissible lower bounds on the cost of completing a partial tour.
//!
//! A partial tour ends at `current`; completing it means visiting every
//! unvisited node once and returning to `start`. Both bounds below never
//! exceed the cheapest such completion, which is what makes pruning safe.

use serde::{Deserialize, Serialize};

use crate::distance::CostMatrix;

/// Lower bound used to prune the search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LowerBound {
    /// Sum of cheapest outgoing edges of `current` and every unvisited node.
    MinimumEdge,
    /// Minimum spanning tree over `unvisited ∪ {current, start}`.
    #[default]
    SpanningTree,
}

impl LowerBound {
    /// Lower bound on the remaining cost from `current` back to `start`.
    ///
    /// `visited` is a bitmask over node indices and must contain both
    /// `current` and `start`. Returns `f64::INFINITY` when no finite
    /// completion can exist.
    pub fn remaining(
        self,
        costs: &CostMatrix,
        visited: u64,
        current: usize,
        start: usize,
    ) -> f64 {
        let n = costs.size();
        let unvisited: Vec<usize> = (0..n).filter(|&i| visited & (1 << i) == 0).collect();
        if unvisited.is_empty() {
            return costs.get(current, start);
        }
        match self {
            LowerBound::MinimumEdge => minimum_edge(costs, &unvisited, current, start),
            LowerBound::SpanningTree => {
                let mut members = unvisited;
                members.push(current);
                if current != start {
                    members.push(start);
                }
                spanning_tree(costs, &members)
            }
        }
    }
}

/// Every unvisited node leaves exactly once, towards another unvisited node
/// or the start; `current` leaves once towards an unvisited node.
fn minimum_edge(costs: &CostMatrix, unvisited: &[usize], current: usize, start: usize) -> f64 {
    let from_current = unvisited
        .iter()
        .map(|&v| costs.get(current, v))
        .fold(f64::INFINITY, f64::min);

    let mut total = from_current;
    for &u in unvisited {
        let cheapest = unvisited
            .iter()
            .copied()
            .chain(std::iter::once(start))
            .filter(|&v| v != u)
            .map(|v| costs.get(u, v))
            .fold(f64::INFINITY, f64::min);
        total += cheapest;
    }
    total
}

/// Prim's algorithm on the undirected view `min(c(i, j), c(j, i))`.
///
/// The remaining Hamiltonian path spans `members`, so its cost is at least
/// the spanning tree's weight, also on asymmetric matrices.
fn spanning_tree(costs: &CostMatrix, members: &[usize]) -> f64 {
    let k = members.len();
    if k < 2 {
        return 0.0;
    }
    let mut in_tree = vec![false; k];
    let mut link = vec![f64::INFINITY; k];
    link[0] = 0.0;
    let mut total = 0.0;

    for _ in 0..k {
        let mut pick: Option<usize> = None;
        for i in 0..k {
            if in_tree[i] {
                continue;
            }
            match pick {
                Some(p) if link[i] >= link[p] => {}
                _ => pick = Some(i),
            }
        }
        let Some(p) = pick else { break };
        if !link[p].is_finite() {
            return f64::INFINITY;
        }
        in_tree[p] = true;
        total += link[p];
        for i in 0..k {
            if !in_tree[i] {
                let w = costs.undirected(members[p], members[i]);
                if w < link[i] {
                    link[i] = w;
                }
            }
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> CostMatrix {
        let d = 2f64.sqrt();
        CostMatrix::from_data(
            4,
            vec![
                0.0, 1.0, d, 1.0, //
                1.0, 0.0, 1.0, d, //
                d, 1.0, 0.0, 1.0, //
                1.0, d, 1.0, 0.0,
            ],
        )
        .expect("valid")
    }

    #[test]
    fn test_root_bounds_are_admissible() {
        let cm = square();
        // optimal tour is 4
        let mst = LowerBound::SpanningTree.remaining(&cm, 1, 0, 0);
        let edge = LowerBound::MinimumEdge.remaining(&cm, 1, 0, 0);
        assert!((mst - 3.0).abs() < 1e-10);
        assert!((edge - 4.0).abs() < 1e-10);
        assert!(mst <= 4.0 + 1e-10);
        assert!(edge <= 4.0 + 1e-10);
    }

    #[test]
    fn test_complete_state_is_return_edge() {
        let cm = square();
        let all = 0b1111;
        assert_eq!(LowerBound::SpanningTree.remaining(&cm, all, 2, 0), cm.get(2, 0));
        assert_eq!(LowerBound::MinimumEdge.remaining(&cm, all, 3, 0), 1.0);
    }

    #[test]
    fn test_partial_state() {
        let cm = square();
        // visited {0, 1}, at 1: remaining path 1→2→3→0 costs 3
        let visited = 0b0011;
        let mst = LowerBound::SpanningTree.remaining(&cm, visited, 1, 0);
        let edge = LowerBound::MinimumEdge.remaining(&cm, visited, 1, 0);
        assert!(mst <= 3.0 + 1e-10);
        assert!(edge <= 3.0 + 1e-10);
        assert!((mst - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_disconnected_is_infinite() {
        let inf = f64::INFINITY;
        let cm = CostMatrix::from_data(3, vec![0.0, 1.0, inf, 1.0, 0.0, inf, inf, inf, 0.0])
            .expect("valid");
        assert!(LowerBound::SpanningTree.remaining(&cm, 1, 0, 0).is_infinite());
        assert!(LowerBound::MinimumEdge.remaining(&cm, 1, 0, 0).is_infinite());
    }
}
