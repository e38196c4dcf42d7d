//! Best-first branch-and-bound search.
//!
//! # Algorithm
//!
//! Partial tours `{path, visited, cost, bound}` wait in a priority queue
//! ordered by `cost + bound` ascending (deeper states first on ties, then
//! insertion order). Popping a state either closes it with the return edge
//! (when every node is on the path) or expands it into one child per
//! unvisited node. Any state with `cost + bound >= best` is discarded; since
//! the queue is ordered by that key, the first such pop ends the search.
//!
//! The incumbent can be seeded with a heuristic tour, which makes the
//! result never worse than that tour. An expansion budget caps the worst
//! case; when it runs out the best incumbent so far is returned.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::bound::LowerBound;
use crate::error::{Result, SolveError};
use crate::graph::Graph;
use crate::models::{AlgorithmKind, IndexTour};

/// Default ceiling on node count.
pub const BNB_MAX_NODES: usize = 10;

/// Default expansion budget.
pub const BNB_MAX_ITERATIONS: usize = 50_000;

/// Counters from one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States popped and expanded or closed.
    pub expanded: usize,
    /// States discarded by the bound.
    pub pruned: usize,
    /// Times the incumbent improved (seed excluded).
    pub improvements: usize,
    /// `true` if the expansion budget ended the search.
    pub budget_exhausted: bool,
}

/// Tour plus search counters.
#[derive(Debug, Clone, PartialEq)]
pub struct BnbOutcome {
    pub tour: IndexTour,
    pub stats: SearchStats,
}

struct State {
    priority: f64,
    seq: u64,
    path: Vec<usize>,
    visited: u64,
    cost: f64,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    // BinaryHeap is a max-heap: "greater" means popped first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| self.path.len().cmp(&other.path.len()))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Configurable branch-and-bound solver.
///
/// # Examples
///
/// ```
/// use u_tsp::branch_bound::{BranchAndBound, LowerBound};
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
/// let outcome = BranchAndBound::new()
///     .with_bound(LowerBound::MinimumEdge)
///     .solve(&graph, 0, None)
///     .unwrap();
/// assert!((outcome.tour.distance - 4.0).abs() < 1e-10);
/// assert!(!outcome.stats.budget_exhausted);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchAndBound {
    bound: LowerBound,
    max_nodes: usize,
    max_iterations: usize,
}

impl Default for BranchAndBound {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchAndBound {
    /// Spanning-tree bound, 10-node ceiling, 50 000 expansions.
    pub fn new() -> Self {
        Self {
            bound: LowerBound::default(),
            max_nodes: BNB_MAX_NODES,
            max_iterations: BNB_MAX_ITERATIONS,
        }
    }

    pub fn with_bound(mut self, bound: LowerBound) -> Self {
        self.bound = bound;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Searches for the cheapest tour from `start`.
    ///
    /// `incumbent` seeds the best-known tour; it is ignored unless it is a
    /// closed tour from `start` over every node with a finite length.
    ///
    /// Fails with [`SolveError::SizeExceeded`] above the node ceiling and
    /// with [`SolveError::NoTourFound`] if the search ends (exhausted or out
    /// of budget) without any finite tour.
    pub fn solve(
        &self,
        graph: &Graph,
        start: usize,
        incumbent: Option<&IndexTour>,
    ) -> Result<BnbOutcome> {
        graph.ensure_node(start)?;
        let n = graph.len();
        let limit = self.max_nodes.min(u64::BITS as usize);
        if n > limit {
            return Err(SolveError::SizeExceeded {
                algorithm: AlgorithmKind::BranchAndBound,
                nodes: n,
                limit,
            });
        }

        let costs = graph.costs();
        let mut best: Option<IndexTour> = incumbent
            .filter(|t| is_valid_seed(t, n, start))
            .map(|t| IndexTour {
                path: t.path.clone(),
                distance: costs.tour_cost(&t.path),
            })
            .filter(|t| t.distance.is_finite());
        let mut best_cost = best.as_ref().map_or(f64::INFINITY, |t| t.distance);
        let mut stats = SearchStats::default();
        let mut seq: u64 = 0;

        let mut queue = BinaryHeap::new();
        let root_visited = 1u64 << start;
        queue.push(State {
            priority: self.bound.remaining(costs, root_visited, start, start),
            seq,
            path: vec![start],
            visited: root_visited,
            cost: 0.0,
        });

        while let Some(state) = queue.pop() {
            if state.priority >= best_cost {
                // every queued state is at least as expensive
                stats.pruned += 1 + queue.len();
                break;
            }
            if stats.expanded >= self.max_iterations {
                stats.budget_exhausted = true;
                break;
            }
            stats.expanded += 1;

            let current = state.path[state.path.len() - 1];
            if state.path.len() == n {
                let total = state.cost + costs.get(current, start);
                if total < best_cost {
                    let mut path = state.path;
                    path.push(start);
                    log::trace!("b&b incumbent {total:.3} after {} expansions", stats.expanded);
                    best_cost = total;
                    best = Some(IndexTour {
                        path,
                        distance: total,
                    });
                    stats.improvements += 1;
                }
                continue;
            }

            for next in 0..n {
                if state.visited & (1 << next) != 0 {
                    continue;
                }
                let cost = state.cost + costs.get(current, next);
                if cost >= best_cost {
                    stats.pruned += 1;
                    continue;
                }
                let visited = state.visited | (1 << next);
                let bound = self.bound.remaining(costs, visited, next, start);
                let priority = cost + bound;
                if priority >= best_cost {
                    stats.pruned += 1;
                    continue;
                }
                let mut path = Vec::with_capacity(state.path.len() + 1);
                path.extend_from_slice(&state.path);
                path.push(next);
                seq += 1;
                queue.push(State {
                    priority,
                    seq,
                    path,
                    visited,
                    cost,
                });
            }
        }

        if stats.budget_exhausted {
            log::warn!(
                "branch-and-bound budget of {} expansions exhausted on {n} nodes",
                self.max_iterations
            );
        }
        log::debug!(
            "branch-and-bound: expanded {}, pruned {}, improvements {}, best {:.3}",
            stats.expanded,
            stats.pruned,
            stats.improvements,
            best_cost
        );

        match best {
            Some(tour) => Ok(BnbOutcome { tour, stats }),
            None if stats.budget_exhausted => Err(SolveError::no_tour(format!(
                "budget of {} expansions exhausted before any complete tour",
                self.max_iterations
            ))),
            None => Err(SolveError::no_tour("no finite Hamiltonian cycle in graph")),
        }
    }
}

fn is_valid_seed(tour: &IndexTour, n: usize, start: usize) -> bool {
    if tour.path.len() != n + 1
        || tour.path.first() != Some(&start)
        || tour.path.last() != Some(&start)
    {
        return false;
    }
    let mut seen = vec![false; n];
    for &i in tour.stops() {
        if i >= n || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}
