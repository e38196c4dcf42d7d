//! Algorithm identifiers and the uniform solve result.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Tour;
use crate::cost::Metrics;
use crate::error::SolveError;

/// Solving strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    /// Enumerate all `(n-1)!` orderings.
    BruteForce,
    /// Held-Karp bitmask dynamic programming.
    DynamicProgramming,
    /// Greedy nearest-neighbor construction.
    NearestNeighbor,
    /// Best-first branch-and-bound.
    BranchAndBound,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 4] = [
        AlgorithmKind::BruteForce,
        AlgorithmKind::DynamicProgramming,
        AlgorithmKind::NearestNeighbor,
        AlgorithmKind::BranchAndBound,
    ];

    /// Stable identifier, identical to the serde name.
    pub fn as_str(self) -> &'static str {
        match self {
            AlgorithmKind::BruteForce => "brute-force",
            AlgorithmKind::DynamicProgramming => "dynamic-programming",
            AlgorithmKind::NearestNeighbor => "nearest-neighbor",
            AlgorithmKind::BranchAndBound => "branch-and-bound",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmKind {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "brute-force" | "bruteforce" => Ok(AlgorithmKind::BruteForce),
            "dynamic-programming" | "dp" | "held-karp" => Ok(AlgorithmKind::DynamicProgramming),
            "nearest-neighbor" | "nn" | "greedy" => Ok(AlgorithmKind::NearestNeighbor),
            "branch-and-bound" | "bnb" => Ok(AlgorithmKind::BranchAndBound),
            other => Err(SolveError::invalid_input(format!(
                "unknown algorithm `{other}`"
            ))),
        }
    }
}

/// Why the requested solver was replaced by nearest-neighbor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SubstitutionReason {
    /// Node count above the solver's ceiling.
    SizeExceeded { nodes: usize, limit: usize },
    /// The solver finished without a finite tour.
    NoTourFound { detail: String },
}

/// How the tour in a [`SolveResult`] was obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Provenance {
    /// The requested algorithm produced the tour.
    Solved,
    /// A fallback algorithm produced the tour.
    Substituted {
        by: AlgorithmKind,
        reason: SubstitutionReason,
    },
    /// No valid tour; the result carries an empty tour and zeroed metrics.
    Failed { reason: String },
}

/// Uniform output of a solve call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Algorithm the caller asked for.
    pub algorithm: AlgorithmKind,
    pub provenance: Provenance,
    pub tour: Tour,
    pub metrics: Metrics,
}

impl SolveResult {
    pub(crate) fn failed(algorithm: AlgorithmKind, reason: impl Into<String>) -> Self {
        Self {
            algorithm,
            provenance: Provenance::Failed {
                reason: reason.into(),
            },
            tour: Tour::empty(),
            metrics: Metrics::zero(),
        }
    }

    /// Algorithm that actually produced the tour, `None` on failure.
    pub fn solved_by(&self) -> Option<AlgorithmKind> {
        match &self.provenance {
            Provenance::Solved => Some(self.algorithm),
            Provenance::Substituted { by, .. } => Some(*by),
            Provenance::Failed { .. } => None,
        }
    }

    pub fn is_substituted(&self) -> bool {
        matches!(self.provenance, Provenance::Substituted { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.provenance, Provenance::Failed { .. })
    }

    /// Serializes the result with the wire field names.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
