//! Side-by-side runs of several algorithms on one graph.

use serde::{Deserialize, Serialize};

use super::{solve, SolverConfig};
use crate::error::{Result, SolveError};
use crate::graph::Graph;
use crate::models::{AlgorithmKind, Conditions, SolveResult};

/// One algorithm's result within a [`Comparison`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntry {
    pub result: SolveResult,
    /// `(distance - best_distance) / best_distance`; `None` for failed
    /// results or when nothing succeeded.
    pub distance_gap: Option<f64>,
}

/// Results of [`compare`], in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub entries: Vec<ComparisonEntry>,
    /// Index into `entries` of the lowest `totalScore`, first on ties.
    pub best: Option<usize>,
}

impl Comparison {
    /// The winning result, if any algorithm produced a tour.
    pub fn best_result(&self) -> Option<&SolveResult> {
        self.best.map(|i| &self.entries[i].result)
    }
}

/// Solves `graph` with every algorithm in `algorithms` and ranks them.
///
/// Runs are independent; each follows the same fallback rules as
/// [`solve`]. Fails with [`SolveError::InvalidInput`] on an empty
/// algorithm list or an unknown `start`.
///
/// # Examples
///
/// ```
/// use u_tsp::{compare, SolverConfig};
/// use u_tsp::graph::Graph;
/// use u_tsp::models::{AlgorithmKind, Conditions, Node};
///
/// let nodes = vec![
///     Node::new("a", 0.0, 0.0),
///     Node::new("b", 2.0, 0.0),
///     Node::new("c", 1.0, 2.0),
/// ];
/// let conditions = Conditions::new();
/// let graph = Graph::build(nodes, &conditions).unwrap();
/// let cmp = compare(&AlgorithmKind::ALL, &graph, "a", &conditions, &SolverConfig::default())
///     .unwrap();
/// assert_eq!(cmp.entries.len(), 4);
/// assert!(cmp.best_result().is_some());
/// ```
pub fn compare(
    algorithms: &[AlgorithmKind],
    graph: &Graph,
    start: &str,
    conditions: &Conditions,
    config: &SolverConfig,
) -> Result<Comparison> {
    if algorithms.is_empty() {
        return Err(SolveError::invalid_input("no algorithms to compare"));
    }
    let results = algorithms
        .iter()
        .map(|&kind| solve(kind, graph, start, conditions, config))
        .collect::<Result<Vec<_>>>()?;

    let best = results
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.is_failed())
        .min_by(|(_, a), (_, b)| a.metrics.total_score.total_cmp(&b.metrics.total_score))
        .map(|(i, _)| i);
    let best_distance = best.map(|i| results[i].metrics.distance);

    let entries = results
        .into_iter()
        .map(|result| {
            let distance_gap = match best_distance {
                Some(_) if result.is_failed() => None,
                Some(d) if d > 0.0 => Some((result.metrics.distance - d) / d),
                Some(_) => Some(0.0),
                None => None,
            };
            ComparisonEntry {
                result,
                distance_gap,
            }
        })
        .collect();

    if let Some(i) = best {
        log::debug!("comparison winner: {}", algorithms[i]);
    }
    Ok(Comparison { entries, best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;

    fn scattered() -> Graph {
        let points = [
            (0.0, 0.0),
            (4.0, 1.0),
            (2.0, 5.0),
            (7.0, 3.0),
            (1.0, 8.0),
            (6.0, 6.0),
            (9.0, 0.5),
        ];
        let nodes = points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Node::new(format!("n{i}"), x, y))
            .collect();
        Graph::build(nodes, &Conditions::new()).expect("valid")
    }

    #[test]
    fn test_exact_solver_wins_or_ties() {
        let g = scattered();
        let cmp = compare(
            &AlgorithmKind::ALL,
            &g,
            "n0",
            &Conditions::new(),
            &SolverConfig::default(),
        )
        .expect("compares");
        let best = cmp.best_result().expect("winner");
        // brute force is first in ALL and optimal
        assert_eq!(cmp.best, Some(0));
        assert_eq!(best.algorithm, AlgorithmKind::BruteForce);
        for entry in &cmp.entries {
            let gap = entry.distance_gap.expect("all succeeded");
            assert!(gap >= -1e-12);
        }
        assert!(cmp.entries[1].distance_gap.expect("dp").abs() < 1e-9);
    }

    #[test]
    fn test_empty_request() {
        let g = scattered();
        assert!(matches!(
            compare(&[], &g, "n0", &Conditions::new(), &SolverConfig::default()),
            Err(SolveError::InvalidInput(_))
        ));
    }
}
