//! Error taxonomy shared by the graph model, the solvers and the dispatcher.

use thiserror::Error as ThisError;

use crate::models::AlgorithmKind;

/// Errors raised while building graphs or solving tours.
///
/// Only [`SolveError::InvalidInput`] escapes [`solve`](crate::dispatch::solve);
/// the other variants are recovered by the dispatcher and reported through
/// [`Provenance`](crate::models::Provenance).
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum SolveError {
    /// Fewer than two nodes, duplicate ids, unknown start node, malformed matrix.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The instance is larger than the solver's node ceiling.
    #[error("{algorithm} accepts at most {limit} nodes, got {nodes}")]
    SizeExceeded {
        /// Solver that refused the instance.
        algorithm: AlgorithmKind,
        /// Node count of the instance.
        nodes: usize,
        /// Solver ceiling.
        limit: usize,
    },
    /// Search finished without a finite closed tour.
    #[error("no tour found: {0}")]
    NoTourFound(String),
    /// A derived metric was NaN or infinite.
    #[error("metric `{metric}` is not finite")]
    NonFiniteMetric {
        /// Name of the offending metric field.
        metric: &'static str,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SolveError>;

impl SolveError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn no_tour(message: impl Into<String>) -> Self {
        Self::NoTourFound(message.into())
    }
}
