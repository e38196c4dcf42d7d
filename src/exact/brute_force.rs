//! Exhaustive permutation search.
//!
//! # Algorithm
//!
//! Fix the start node, enumerate every ordering of the remaining `n - 1`
//! nodes in lexicographic index order, price each closed tour from the cost
//! matrix and keep the cheapest. A strict `<` comparison keeps the first
//! optimum in generation order, so ties resolve deterministically.
//!
//! # Complexity
//!
//! O(n · (n-1)!) time, O(n) space.

use crate::distance::CostMatrix;
use crate::error::{Result, SolveError};
use crate::graph::Graph;
use crate::models::{AlgorithmKind, IndexTour};

/// Default ceiling: at most 8 non-start nodes.
pub const BRUTE_FORCE_MAX_NODES: usize = 9;

/// Finds the optimal tour from `start` by trying every permutation.
///
/// Fails with [`SolveError::SizeExceeded`] when the graph has more than
/// `max_nodes` nodes and with [`SolveError::NoTourFound`] when every
/// permutation uses a missing (infinite) edge.
///
/// # Examples
///
/// ```
/// use u_tsp::exact::brute_force;
/// use u_tsp::graph::Graph;
/// use u_tsp::models::{Conditions, Node};
///
/// let nodes = vec![
///     Node::new("a", 0.0, 0.0),
///     Node::new("b", 1.0, 0.0),
///     Node::new("c", 1.0, 1.0),
///     Node::new("d", 0.0, 1.0),
/// ];
/// let graph = Graph::build(nodes, &Conditions::new()).unwrap();
/// let tour = brute_force(&graph, 0, 9).unwrap();
/// assert!((tour.distance - 4.0).abs() < 1e-10);
/// ```
pub fn brute_force(graph: &Graph, start: usize, max_nodes: usize) -> Result<IndexTour> {
    graph.ensure_node(start)?;
    let n = graph.len();
    if n > max_nodes {
        return Err(SolveError::SizeExceeded {
            algorithm: AlgorithmKind::BruteForce,
            nodes: n,
            limit: max_nodes,
        });
    }

    let costs = graph.costs();
    let mut rest: Vec<usize> = (0..n).filter(|&i| i != start).collect();
    let mut best: Option<(f64, Vec<usize>)> = None;
    let mut evaluated: u64 = 0;

    loop {
        evaluated += 1;
        let bound = best.as_ref().map_or(f64::INFINITY, |(d, _)| *d);
        if let Some(d) = closed_cost(costs, start, &rest, bound) {
            best = Some((d, rest.clone()));
        }
        if !next_permutation(&mut rest) {
            break;
        }
    }

    let (distance, order) = best.ok_or_else(|| {
        SolveError::no_tour(format!("all {evaluated} permutations use a missing edge"))
    })?;

    let mut path = Vec::with_capacity(n + 1);
    path.push(start);
    path.extend(order);
    path.push(start);

    log::debug!("brute force: {evaluated} permutations, best distance {distance:.3}");
    Ok(IndexTour { path, distance })
}

/// Cost of `start → rest… → start` if it is finite and below `bound`.
fn closed_cost(costs: &CostMatrix, start: usize, rest: &[usize], bound: f64) -> Option<f64> {
    let mut total = 0.0;
    let mut prev = start;
    for &next in rest.iter().chain(std::iter::once(&start)) {
        total += costs.get(prev, next);
        // also rejects infinite partial sums
        if total >= bound {
            return None;
        }
        prev = next;
    }
    Some(total)
}

/// Rearranges `items` into the next lexicographic permutation.
///
/// Returns `false` (leaving `items` unchanged) once the last permutation
/// has been reached.
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let mut i = items.len() - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = items.len() - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Conditions, Node};

    fn square() -> Graph {
        Graph::build(
            vec![
                Node::new("a", 0.0, 0.0),
                Node::new("b", 1.0, 0.0),
                Node::new("c", 1.0, 1.0),
                Node::new("d", 0.0, 1.0),
            ],
            &Conditions::new(),
        )
        .expect("valid")
    }

    #[test]
    fn test_next_permutation_order() {
        let mut v = vec![1, 2, 3];
        let mut seen = vec![v.clone()];
        while next_permutation(&mut v) {
            seen.push(v.clone());
        }
        assert_eq!(seen.len(), 6);
        assert_eq!(seen[1], vec![1, 3, 2]);
        assert_eq!(seen[5], vec![3, 2, 1]);
    }

    #[test]
    fn test_square_perimeter() {
        let t = brute_force(&square(), 0, BRUTE_FORCE_MAX_NODES).expect("solves");
        assert!((t.distance - 4.0).abs() < 1e-10);
        // first optimum in lexicographic order
        assert_eq!(t.path, vec![0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_non_zero_start() {
        let t = brute_force(&square(), 2, BRUTE_FORCE_MAX_NODES).expect("solves");
        assert_eq!(t.path.first(), Some(&2));
        assert_eq!(t.path.last(), Some(&2));
        assert!((t.distance - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_two_nodes() {
        let g = Graph::build(
            vec![Node::new("a", 0.0, 0.0), Node::new("b", 3.0, 4.0)],
            &Conditions::new(),
        )
        .expect("valid");
        let t = brute_force(&g, 0, BRUTE_FORCE_MAX_NODES).expect("solves");
        assert_eq!(t.path, vec![0, 1, 0]);
        assert!((t.distance - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_size_exceeded() {
        let nodes = (0..10).map(|i| Node::new(format!("n{i}"), i as f64, 0.0)).collect();
        let g = Graph::build(nodes, &Conditions::new()).expect("valid");
        let err = brute_force(&g, 0, BRUTE_FORCE_MAX_NODES).expect_err("too big");
        assert_eq!(
            err,
            SolveError::SizeExceeded {
                algorithm: AlgorithmKind::BruteForce,
                nodes: 10,
                limit: 9
            }
        );
    }

    #[test]
    fn test_skips_missing_edges() {
        let inf = f64::INFINITY;
        // only the ring 0-1-2-3-0 is connected
        let m = CostMatrix::from_data(
            4,
            vec![
                0.0, 1.0, inf, 1.0, //
                1.0, 0.0, 1.0, inf, //
                inf, 1.0, 0.0, 1.0, //
                1.0, inf, 1.0, 0.0,
            ],
        )
        .expect("valid");
        let nodes = (0..4).map(|i| Node::new(format!("n{i}"), 0.0, 0.0)).collect();
        let g = Graph::from_matrix(nodes, m).expect("valid");
        let t = brute_force(&g, 0, BRUTE_FORCE_MAX_NODES).expect("solves");
        assert_eq!(t.distance, 4.0);
    }

    #[test]
    fn test_disconnected() {
        let inf = f64::INFINITY;
        let m = CostMatrix::from_data(3, vec![0.0, 1.0, inf, 1.0, 0.0, inf, inf, inf, 0.0])
            .expect("valid");
        let nodes = (0..3).map(|i| Node::new(format!("n{i}"), 0.0, 0.0)).collect();
        let g = Graph::from_matrix(nodes, m).expect("valid");
        assert!(matches!(
            brute_force(&g, 0, BRUTE_FORCE_MAX_NODES),
            Err(SolveError::NoTourFound(_))
        ));
    }
}
