//! Held-Karp bitmask dynamic programming.
//!
//! # Algorithm
//!
//! `dp[mask][j]` is the cheapest path that leaves the fixed start, visits
//! exactly the nodes in `mask` (start included) and ends at `j`:
//!
//! ```text
//! dp[{start}][start]        = 0
//! dp[mask | 1<<k][k]        = min over j in mask of dp[mask][j] + c(j, k)
//! optimum                   = min over j != start of dp[full][j] + c(j, start)
//! ```
//!
//! Masks are processed in increasing numeric order, which is a valid
//! topological order because every transition adds a bit. A parent table
//! with the same layout as `dp` rebuilds the tour. Infinite (missing) edges
//! never relax a state, so they cannot appear in the result.
//!
//! # Complexity
//!
//! O(n² · 2ⁿ) time, O(n · 2ⁿ) space.
//!
//! # Reference
//!
//! Held, M. & Karp, R.M. (1962). "A dynamic programming approach to
//! sequencing problems", *J. SIAM* 10(1), 196-210.

use crate::error::{Result, SolveError};
use crate::graph::Graph;
use crate::models::{AlgorithmKind, IndexTour};

/// Default ceiling on node count.
pub const HELD_KARP_MAX_NODES: usize = 12;

const NO_PARENT: usize = usize::MAX;

/// Finds the optimal tour from `start` by dynamic programming over subsets.
///
/// Fails with [`SolveError::SizeExceeded`] above `max_nodes` nodes and with
/// [`SolveError::NoTourFound`] if no finite closed tour exists.
///
/// # Examples
///
/// ```
/// use u_tsp::exact::held_karp;
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
/// let tour = held_karp(&graph, 0, 12).unwrap();
/// assert!((tour.distance - 4.0).abs() < 1e-10);
/// ```
pub fn held_karp(graph: &Graph, start: usize, max_nodes: usize) -> Result<IndexTour> {
    graph.ensure_node(start)?;
    let n = graph.len();
    // the mask must also fit in a usize shift
    let limit = max_nodes.min(usize::BITS as usize - 1);
    if n > limit {
        return Err(SolveError::SizeExceeded {
            algorithm: AlgorithmKind::DynamicProgramming,
            nodes: n,
            limit,
        });
    }

    let costs = graph.costs();
    let states = 1usize << n;
    let full = states - 1;
    let start_bit = 1usize << start;

    let mut dp = vec![f64::INFINITY; states * n];
    let mut parent = vec![NO_PARENT; states * n];
    dp[start_bit * n + start] = 0.0;

    for mask in 0..states {
        if mask & start_bit == 0 {
            continue;
        }
        for j in 0..n {
            let here = dp[mask * n + j];
            if mask & (1 << j) == 0 || !here.is_finite() {
                continue;
            }
            for k in 0..n {
                if mask & (1 << k) != 0 {
                    continue;
                }
                let candidate = here + costs.get(j, k);
                let next = (mask | (1 << k)) * n + k;
                if candidate < dp[next] {
                    dp[next] = candidate;
                    parent[next] = j;
                }
            }
        }
    }

    let mut best: Option<(f64, usize)> = None;
    for j in (0..n).filter(|&j| j != start) {
        let total = dp[full * n + j] + costs.get(j, start);
        let better = match best {
            Some((d, _)) => total < d,
            None => total.is_finite(),
        };
        if better {
            best = Some((total, j));
        }
    }
    let (distance, last) =
        best.ok_or_else(|| SolveError::no_tour("no finite Hamiltonian cycle in graph"))?;

    let mut reversed = Vec::with_capacity(n + 1);
    reversed.push(start);
    let mut mask = full;
    let mut j = last;
    while j != start {
        reversed.push(j);
        let p = parent[mask * n + j];
        if p == NO_PARENT {
            return Err(SolveError::no_tour("broken parent chain"));
        }
        mask &= !(1 << j);
        j = p;
    }
    reversed.push(start);
    reversed.reverse();

    log::debug!("held-karp: {n} nodes, {states} subsets, best distance {distance:.3}");
    Ok(IndexTour {
        path: reversed,
        distance,
    })
}
