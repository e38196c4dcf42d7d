//! Immutable weighted graph and its builder.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::cost::road_edge_cost;
use crate::distance::{CostMatrix, MetricSpace};
use crate::error::{Result, SolveError};
use crate::models::{Conditions, Node, RoadType};

/// Seeded multiplicative perturbation of edge weights.
///
/// Each unordered pair `{i, j}` (`i < j`, row-major order) draws one factor
/// in `[1 - amplitude, 1 + amplitude]` applied to both directions, so the
/// matrix stays symmetric and the same seed always yields the same graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Jitter {
    pub seed: u64,
    pub amplitude: f64,
}

/// Builder for [`Graph`] with metric space, road types and jitter.
///
/// # Examples
///
/// ```
/// use u_tsp::graph::GraphBuilder;
/// use u_tsp::distance::MetricSpace;
/// use u_tsp::models::{Conditions, Node, RoadType};
///
/// let graph = GraphBuilder::new()
///     .metric(MetricSpace::Euclidean)
///     .road("a", "b", RoadType::Highway)
///     .build(
///         vec![Node::new("a", 0.0, 0.0), Node::new("b", 100.0, 0.0)],
///         &Conditions::new(),
///     )
///     .unwrap();
/// assert!((graph.cost(0, 1) - 85.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    metric: MetricSpace,
    default_road: RoadType,
    roads: Vec<(String, String, RoadType)>,
    jitter: Option<Jitter>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how coordinates are measured.
    pub fn metric(mut self, metric: MetricSpace) -> Self {
        self.metric = metric;
        self
    }

    /// Road type for pairs without an explicit [`road`](Self::road).
    pub fn default_road(mut self, road: RoadType) -> Self {
        self.default_road = road;
        self
    }

    /// Declares the road type between `a` and `b` (both directions).
    pub fn road(mut self, a: impl Into<String>, b: impl Into<String>, road: RoadType) -> Self {
        self.roads.push((a.into(), b.into(), road));
        self
    }

    /// Enables seeded jitter.
    pub fn jitter(mut self, seed: u64, amplitude: f64) -> Self {
        self.jitter = Some(Jitter { seed, amplitude });
        self
    }

    /// Validates the nodes and computes the dense cost matrix.
    ///
    /// Fails with [`SolveError::InvalidInput`] for fewer than two nodes,
    /// duplicate ids, non-finite coordinates or edge weights, roads naming
    /// unknown nodes, or a jitter amplitude outside `[0, 1)`.
    pub fn build(self, nodes: Vec<Node>, conditions: &Conditions) -> Result<Graph> {
        let index = index_nodes(&nodes)?;
        if let Some(node) = nodes.iter().find(|n| !n.x().is_finite() || !n.y().is_finite()) {
            return Err(SolveError::invalid_input(format!(
                "node `{}` has non-finite coordinates",
                node.id()
            )));
        }

        let n = nodes.len();
        let mut roads = vec![self.default_road; n * n];
        for (a, b, road) in &self.roads {
            let (i, j) = match (index.get(a.as_str()), index.get(b.as_str())) {
                (Some(&i), Some(&j)) => (i, j),
                _ => {
                    return Err(SolveError::invalid_input(format!(
                        "road `{a}`-`{b}` names an unknown node"
                    )))
                }
            };
            roads[i * n + j] = *road;
            roads[j * n + i] = *road;
        }

        let mut jitter = match self.jitter {
            Some(j) if !(0.0..1.0).contains(&j.amplitude) => {
                return Err(SolveError::invalid_input(format!(
                    "jitter amplitude {} outside [0, 1)",
                    j.amplitude
                )))
            }
            Some(j) if j.amplitude > 0.0 => Some((StdRng::seed_from_u64(j.seed), j.amplitude)),
            _ => None,
        };

        let mut costs = CostMatrix::new(n);
        let mut lengths = CostMatrix::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let base = self.metric.distance(&nodes[i], &nodes[j]);
                let factor = match jitter.as_mut() {
                    Some((rng, amp)) => 1.0 + rng.random_range(-*amp..=*amp),
                    None => 1.0,
                };
                for (from, to) in [(i, j), (j, i)] {
                    let road = roads[from * n + to];
                    let length = base * road.factor() * factor;
                    let weight = road_edge_cost(base, road, conditions) * factor;
                    if !weight.is_finite() || !length.is_finite() {
                        return Err(SolveError::invalid_input(format!(
                            "edge `{}`-`{}` has a non-finite weight",
                            nodes[from].id(),
                            nodes[to].id()
                        )));
                    }
                    lengths.set(from, to, length);
                    costs.set(from, to, weight);
                }
            }
        }

        log::debug!(
            "built {:?} graph with {} nodes (jitter: {})",
            self.metric,
            n,
            self.jitter.is_some()
        );

        Ok(Graph {
            nodes,
            index,
            costs,
            lengths,
        })
    }
}

/// An immutable, effectively complete weighted graph.
///
/// Nodes get dense indices `0..n` in input order. `cost(i, i) == 0` and the
/// matrix never changes after construction. Geometry-derived graphs are
/// always symmetric; only [`Graph::from_matrix`] can introduce asymmetric
/// or missing (`f64::INFINITY`) edges.
///
/// Next to the weights the graph keeps the physical edge lengths (road
/// type and jitter applied, conditions not), which drive travel time and
/// fuel in the tour metrics.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    costs: CostMatrix,
    lengths: CostMatrix,
}

impl Graph {
    /// Builds a planar (Euclidean) graph with default road types.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::graph::Graph;
    /// use u_tsp::models::{Conditions, Node};
    ///
    /// let nodes = vec![Node::new("a", 0.0, 0.0), Node::new("b", 3.0, 4.0)];
    /// let graph = Graph::build(nodes, &Conditions::new()).unwrap();
    /// assert_eq!(graph.len(), 2);
    /// assert!((graph.cost(0, 1) - 5.0).abs() < 1e-10);
    /// assert_eq!(graph.cost(1, 1), 0.0);
    /// ```
    pub fn build(nodes: Vec<Node>, conditions: &Conditions) -> Result<Self> {
        GraphBuilder::new().build(nodes, conditions)
    }

    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Wraps an externally computed matrix (e.g. from a road router).
    ///
    /// The matrix is used as-is: entries may be asymmetric or
    /// `f64::INFINITY` for missing edges. It serves as both the weights and
    /// the physical lengths.
    pub fn from_matrix(nodes: Vec<Node>, costs: CostMatrix) -> Result<Self> {
        let index = index_nodes(&nodes)?;
        if costs.size() != nodes.len() {
            return Err(SolveError::invalid_input(format!(
                "matrix size {} does not match {} nodes",
                costs.size(),
                nodes.len()
            )));
        }
        Ok(Self {
            nodes,
            index,
            lengths: costs.clone(),
            costs,
        })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a graph holds at least two nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// Dense index of the node with `id`.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Edge weight from `from` to `to`.
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.costs.get(from, to)
    }

    pub fn costs(&self) -> &CostMatrix {
        &self.costs
    }

    /// Physical edge lengths in meters, without condition factors.
    pub fn lengths(&self) -> &CostMatrix {
        &self.lengths
    }

    /// Fails with [`SolveError::InvalidInput`] if `index` is not a node.
    pub(crate) fn ensure_node(&self, index: usize) -> Result<()> {
        if index < self.nodes.len() {
            Ok(())
        } else {
            Err(SolveError::invalid_input(format!(
                "start index {index} outside graph of {} nodes",
                self.nodes.len()
            )))
        }
    }

    /// Maps dense indices back to node ids.
    pub fn ids_of(&self, path: &[usize]) -> Vec<String> {
        path.iter().map(|&i| self.nodes[i].id().to_string()).collect()
    }
}

fn index_nodes(nodes: &[Node]) -> Result<HashMap<String, usize>> {
    if nodes.len() < 2 {
        return Err(SolveError::invalid_input(format!(
            "a graph needs at least 2 nodes, got {}",
            nodes.len()
        )));
    }
    let mut index = HashMap::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        if index.insert(node.id().to_string(), i).is_some() {
            return Err(SolveError::invalid_input(format!(
                "duplicate node id `{}`",
                node.id()
            )));
        }
    }
    Ok(index)
}
