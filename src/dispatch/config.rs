//! Solver configuration.

use serde::{Deserialize, Serialize};

use crate::branch_bound::{LowerBound, BNB_MAX_ITERATIONS, BNB_MAX_NODES};
use crate::cost::ScoringPolicy;
use crate::exact::{BRUTE_FORCE_MAX_NODES, HELD_KARP_MAX_NODES};

/// Ceilings and tuning knobs shared by every solve call.
///
/// Missing fields take their defaults when deserialized.
///
/// # Examples
///
/// ```
/// use u_tsp::SolverConfig;
/// use u_tsp::branch_bound::LowerBound;
///
/// let config = SolverConfig::default()
///     .with_two_opt(true)
///     .with_lower_bound(LowerBound::MinimumEdge);
/// assert_eq!(config.dp_max_nodes, 12);
/// assert_eq!(SolverConfig::strict().bnb_max_nodes, 9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Largest graph brute force accepts.
    pub brute_force_max_nodes: usize,
    /// Largest graph Held-Karp accepts.
    pub dp_max_nodes: usize,
    /// Largest graph branch-and-bound accepts.
    pub bnb_max_nodes: usize,
    /// Expansion budget of branch-and-bound.
    pub bnb_max_iterations: usize,
    pub lower_bound: LowerBound,
    /// Pull of node significance in nearest-neighbor; 0 disables it.
    pub importance_weight: f64,
    /// Refine nearest-neighbor tours (including fallbacks) with 2-opt.
    pub two_opt: bool,
    pub scoring: ScoringPolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            brute_force_max_nodes: BRUTE_FORCE_MAX_NODES,
            dp_max_nodes: HELD_KARP_MAX_NODES,
            bnb_max_nodes: BNB_MAX_NODES,
            bnb_max_iterations: BNB_MAX_ITERATIONS,
            lower_bound: LowerBound::default(),
            importance_weight: 0.0,
            two_opt: false,
            scoring: ScoringPolicy::default(),
        }
    }
}

impl SolverConfig {
    /// Defaults with the tighter branch-and-bound ceiling of 9 nodes.
    pub fn strict() -> Self {
        Self {
            bnb_max_nodes: 9,
            ..Self::default()
        }
    }

    pub fn with_brute_force_max_nodes(mut self, n: usize) -> Self {
        self.brute_force_max_nodes = n;
        self
    }

    pub fn with_dp_max_nodes(mut self, n: usize) -> Self {
        self.dp_max_nodes = n;
        self
    }

    pub fn with_bnb_max_nodes(mut self, n: usize) -> Self {
        self.bnb_max_nodes = n;
        self
    }

    pub fn with_bnb_max_iterations(mut self, n: usize) -> Self {
        self.bnb_max_iterations = n;
        self
    }

    pub fn with_lower_bound(mut self, bound: LowerBound) -> Self {
        self.lower_bound = bound;
        self
    }

    pub fn with_importance_weight(mut self, weight: f64) -> Self {
        self.importance_weight = weight;
        self
    }

    pub fn with_two_opt(mut self, enabled: bool) -> Self {
        self.two_opt = enabled;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }
}
