//! Node and node attribute types.

use serde::{Deserialize, Serialize};

/// Optional attributes that make a node more "significant" to visit early.
///
/// Both fields are soft hints used only by the importance-weighted
/// nearest-neighbor heuristic; exact solvers ignore them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeAttributes {
    /// Resident population around the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<f64>,
    /// Caller-defined importance, typically in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,
}

/// A location in a TSP instance.
///
/// Identity is the string `id`. Coordinates are planar `(x, y)` or, for
/// geographic graphs, `x = longitude` and `y = latitude` in degrees.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Node;
///
/// let n = Node::new("depot", 3.0, 4.0).with_importance(0.5);
/// assert_eq!(n.id(), "depot");
/// assert_eq!(n.x(), 3.0);
/// assert_eq!(n.attributes().importance, Some(0.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: String,
    x: f64,
    y: f64,
    #[serde(default)]
    attributes: NodeAttributes,
}

impl Node {
    /// Creates a node without attributes.
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            attributes: NodeAttributes::default(),
        }
    }

    /// Sets the population attribute.
    pub fn with_population(mut self, population: f64) -> Self {
        self.attributes.population = Some(population);
        self
    }

    /// Sets the importance attribute.
    pub fn with_importance(mut self, importance: f64) -> Self {
        self.attributes.importance = Some(importance);
        self
    }

    /// Node identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// X-coordinate (longitude for geographic graphs).
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate (latitude for geographic graphs).
    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn attributes(&self) -> &NodeAttributes {
        &self.attributes
    }

    /// Combined significance used to bias greedy selection.
    ///
    /// `importance` counts as-is, population contributes `ln(1 + p) / 10`
    /// so a city of ~22k inhabitants weighs like `importance = 1.0`.
    /// Negative or non-finite inputs count as zero.
    pub fn significance(&self) -> f64 {
        let importance = self
            .attributes
            .importance
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
            .max(0.0);
        let population = self
            .attributes
            .population
            .filter(|v| v.is_finite())
            .map(|p| p.max(0.0).ln_1p() / 10.0)
            .unwrap_or(0.0);
        importance + population
    }
}
