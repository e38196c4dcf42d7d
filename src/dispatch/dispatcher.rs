//! Algorithm selection, fallback and metric assembly.

use crate::branch_bound::BranchAndBound;
use crate::constructive::nearest_neighbor;
use crate::cost::path_metrics;
use crate::error::{Result, SolveError};
use crate::exact::{brute_force, held_karp};
use crate::graph::Graph;
use crate::local_search::two_opt_improve;
use crate::models::{
    AlgorithmKind, Conditions, IndexTour, Node, Provenance, SolveResult, SubstitutionReason, Tour,
};

use super::SolverConfig;

/// Solves the tour problem on `graph` starting and ending at `start`.
///
/// The requested solver runs first. If it rejects the instance size or
/// finds no finite tour, nearest-neighbor produces the tour instead and
/// the result is marked [`Provenance::Substituted`]. A tour whose metrics
/// are not finite (only possible on graphs with missing edges) yields a
/// [`Provenance::Failed`] result with an empty tour and zeroed metrics.
///
/// Only [`SolveError::InvalidInput`] is returned as an error, e.g. for a
/// `start` that is not a node of `graph`.
///
/// # Examples
///
/// ```
/// use u_tsp::{solve, SolverConfig};
/// use u_tsp::graph::Graph;
/// use u_tsp::models::{AlgorithmKind, Conditions, Node, Provenance};
///
/// let nodes = vec![
///     Node::new("a", 0.0, 0.0),
///     Node::new("b", 1.0, 0.0),
///     Node::new("c", 1.0, 1.0),
///     Node::new("d", 0.0, 1.0),
/// ];
/// let conditions = Conditions::new();
/// let graph = Graph::build(nodes, &conditions).unwrap();
/// let result = solve(
///     AlgorithmKind::DynamicProgramming,
///     &graph,
///     "a",
///     &conditions,
///     &SolverConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(result.provenance, Provenance::Solved);
/// assert!(result.tour.is_closed());
/// assert!((result.metrics.distance - 4.0).abs() < 1e-10);
/// ```
pub fn solve(
    algorithm: AlgorithmKind,
    graph: &Graph,
    start: &str,
    conditions: &Conditions,
    config: &SolverConfig,
) -> Result<SolveResult> {
    let start_index = graph.index_of(start).ok_or_else(|| {
        SolveError::invalid_input(format!("start node `{start}` is not in the graph"))
    })?;
    log::debug!(
        "solving {} nodes with {algorithm} from `{start}`",
        graph.len()
    );

    let (tour, provenance) = match run(algorithm, graph, start_index, config) {
        Ok(tour) => (tour, Provenance::Solved),
        Err(err @ SolveError::InvalidInput(_)) => return Err(err),
        Err(err) => {
            let reason = match err {
                SolveError::SizeExceeded { nodes, limit, .. } => {
                    SubstitutionReason::SizeExceeded { nodes, limit }
                }
                other => SubstitutionReason::NoTourFound {
                    detail: other.to_string(),
                },
            };
            log::warn!("{algorithm} fell back to nearest-neighbor: {reason:?}");
            let fallback = nearest_neighbor_tour(graph, start_index, config);
            (
                fallback,
                Provenance::Substituted {
                    by: AlgorithmKind::NearestNeighbor,
                    reason,
                },
            )
        }
    };

    let metrics = match path_metrics(&tour.path, graph, conditions, &config.scoring) {
        Ok(metrics) => metrics,
        Err(err) => {
            log::warn!("{algorithm} produced an unusable tour: {err}");
            return Ok(SolveResult::failed(algorithm, err.to_string()));
        }
    };
    log::debug!(
        "{algorithm} finished: distance {:.3}, score {:.3}",
        metrics.distance,
        metrics.total_score
    );

    Ok(SolveResult {
        algorithm,
        provenance,
        tour: Tour::new(graph.ids_of(&tour.path)),
        metrics,
    })
}

/// Builds the graph from `nodes` and solves it.
///
/// Fewer than two nodes is not an error: the result is
/// [`Provenance::Failed`] with an empty tour. Duplicate ids, invalid
/// coordinates and an unknown `start` still return
/// [`SolveError::InvalidInput`].
///
/// # Examples
///
/// ```
/// use u_tsp::{solve_nodes, SolverConfig};
/// use u_tsp::models::{AlgorithmKind, Conditions, Node};
///
/// let result = solve_nodes(
///     AlgorithmKind::NearestNeighbor,
///     vec![Node::new("only", 0.0, 0.0)],
///     "only",
///     &Conditions::new(),
///     &SolverConfig::default(),
/// )
/// .unwrap();
/// assert!(result.is_failed());
/// assert!(result.tour.is_empty());
/// ```
pub fn solve_nodes(
    algorithm: AlgorithmKind,
    nodes: Vec<Node>,
    start: &str,
    conditions: &Conditions,
    config: &SolverConfig,
) -> Result<SolveResult> {
    if nodes.len() < 2 {
        return Ok(SolveResult::failed(
            algorithm,
            format!("a tour needs at least 2 nodes, got {}", nodes.len()),
        ));
    }
    let graph = Graph::build(nodes, conditions)?;
    solve(algorithm, &graph, start, conditions, config)
}

fn run(
    algorithm: AlgorithmKind,
    graph: &Graph,
    start: usize,
    config: &SolverConfig,
) -> Result<IndexTour> {
    let tour = match algorithm {
        AlgorithmKind::BruteForce => brute_force(graph, start, config.brute_force_max_nodes)?,
        AlgorithmKind::DynamicProgramming => held_karp(graph, start, config.dp_max_nodes)?,
        AlgorithmKind::NearestNeighbor => nearest_neighbor_tour(graph, start, config),
        AlgorithmKind::BranchAndBound => {
            let seed = nearest_neighbor_tour(graph, start, config);
            BranchAndBound::new()
                .with_bound(config.lower_bound)
                .with_max_nodes(config.bnb_max_nodes)
                .with_max_iterations(config.bnb_max_iterations)
                .solve(graph, start, Some(&seed))?
                .tour
        }
    };
    Ok(tour)
}

/// Nearest-neighbor tour, refined with 2-opt when enabled.
fn nearest_neighbor_tour(graph: &Graph, start: usize, config: &SolverConfig) -> IndexTour {
    let tour = nearest_neighbor(graph, start, config.importance_weight);
    if config.two_opt && tour.distance.is_finite() {
        two_opt_improve(&tour, graph.costs())
    } else {
        tour
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CostMatrix;

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

    fn line(n: usize) -> Vec<Node> {
        (0..n)
            .map(|i| Node::new(format!("n{i}"), i as f64 * 10.0, (i % 3) as f64))
            .collect()
    }

    #[test]
    fn test_solve_all_on_square() {
        let g = square();
        let c = Conditions::new();
        for kind in AlgorithmKind::ALL {
            let r = solve(kind, &g, "a", &c, &SolverConfig::default()).expect("solves");
            assert_eq!(r.algorithm, kind);
            assert_eq!(r.provenance, Provenance::Solved);
            assert_eq!(r.tour.start(), Some("a"));
            assert!(r.tour.is_closed());
            assert!((r.metrics.distance - 4.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_unknown_start_is_error() {
        let err = solve(
            AlgorithmKind::NearestNeighbor,
            &square(),
            "zz",
            &Conditions::new(),
            &SolverConfig::default(),
        )
        .expect_err("unknown start");
        assert!(matches!(err, SolveError::InvalidInput(_)));
    }

    #[test]
    fn test_size_exceeded_substitutes() {
        let c = Conditions::new();
        let g = Graph::build(line(11), &c).expect("valid");
        for kind in [AlgorithmKind::BruteForce, AlgorithmKind::BranchAndBound] {
            let r = solve(kind, &g, "n0", &c, &SolverConfig::default()).expect("solves");
            assert_eq!(r.algorithm, kind);
            assert_eq!(r.solved_by(), Some(AlgorithmKind::NearestNeighbor));
            assert!(r.tour.is_closed());
            assert_eq!(r.tour.num_stops(), 11);
        }
        let dp = solve(AlgorithmKind::DynamicProgramming, &g, "n0", &c, &SolverConfig::default())
            .expect("solves");
        assert_eq!(dp.provenance, Provenance::Solved);
    }

    #[test]
    fn test_strict_profile_ceiling() {
        let c = Conditions::new();
        let g = Graph::build(line(10), &c).expect("valid");
        let r = solve(AlgorithmKind::BranchAndBound, &g, "n0", &c, &SolverConfig::strict())
            .expect("solves");
        assert_eq!(
            r.provenance,
            Provenance::Substituted {
                by: AlgorithmKind::NearestNeighbor,
                reason: SubstitutionReason::SizeExceeded {
                    nodes: 10,
                    limit: 9
                },
            }
        );
    }

    #[test]
    fn test_bnb_budget_keeps_seed() {
        let c = Conditions::new();
        let g = Graph::build(line(9), &c).expect("valid");
        let config = SolverConfig::default().with_bnb_max_iterations(1);
        let r = solve(AlgorithmKind::BranchAndBound, &g, "n0", &c, &config).expect("solves");
        assert_eq!(r.provenance, Provenance::Solved);
        let nn = solve(AlgorithmKind::NearestNeighbor, &g, "n0", &c, &config).expect("solves");
        assert!(r.metrics.distance <= nn.metrics.distance + 1e-9);
    }

    #[test]
    fn test_two_opt_never_worse() {
        let c = Conditions::new();
        let nodes = vec![
            Node::new("a", 0.0, 0.0),
            Node::new("b", 4.0, 1.0),
            Node::new("c", 2.0, 5.0),
            Node::new("d", 7.0, 3.0),
            Node::new("e", 1.0, 8.0),
            Node::new("f", 6.0, 6.0),
        ];
        let g = Graph::build(nodes, &c).expect("valid");
        let plain = solve(AlgorithmKind::NearestNeighbor, &g, "a", &c, &SolverConfig::default())
            .expect("solves");
        let refined = solve(
            AlgorithmKind::NearestNeighbor,
            &g,
            "a",
            &c,
            &SolverConfig::default().with_two_opt(true),
        )
        .expect("solves");
        assert!(refined.metrics.distance <= plain.metrics.distance + 1e-10);
    }

    #[test]
    fn test_missing_edges_fail_cleanly() {
        let inf = f64::INFINITY;
        // node 2 is unreachable
        let m = CostMatrix::from_data(3, vec![0.0, 1.0, inf, 1.0, 0.0, inf, inf, inf, 0.0])
            .expect("valid");
        let nodes = (0..3).map(|i| Node::new(format!("n{i}"), 0.0, 0.0)).collect();
        let g = Graph::from_matrix(nodes, m).expect("valid");
        for kind in AlgorithmKind::ALL {
            let r = solve(kind, &g, "n0", &Conditions::new(), &SolverConfig::default())
                .expect("not an input error");
            assert!(r.is_failed());
            assert!(r.tour.is_empty());
            assert_eq!(r.metrics.total_score, 0.0);
        }
    }

    #[test]
    fn test_solve_nodes_degenerate() {
        let c = Conditions::new();
        let config = SolverConfig::default();
        let empty = solve_nodes(AlgorithmKind::BruteForce, vec![], "a", &c, &config)
            .expect("not an error");
        assert!(empty.is_failed());
        assert_eq!(empty.solved_by(), None);

        let dup = solve_nodes(
            AlgorithmKind::BruteForce,
            vec![Node::new("a", 0.0, 0.0), Node::new("a", 1.0, 0.0)],
            "a",
            &c,
            &config,
        );
        assert!(matches!(dup, Err(SolveError::InvalidInput(_))));
    }

    #[test]
    fn test_solve_nodes_two() {
        let r = solve_nodes(
            AlgorithmKind::DynamicProgramming,
            vec![Node::new("a", 0.0, 0.0), Node::new("b", 3.0, 4.0)],
            "b",
            &Conditions::new(),
            &SolverConfig::default(),
        )
        .expect("solves");
        assert_eq!(r.tour.ids(), ["b", "a", "b"]);
        assert!((r.metrics.distance - 10.0).abs() < 1e-10);
    }
}
