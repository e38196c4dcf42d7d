//! Closed tour type.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::distance::CostMatrix;

/// A closed tour: `n + 1` node ids where the first and last are the start.
///
/// Tours are produced fresh by solvers and never edited afterwards.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Tour;
///
/// let tour = Tour::new(vec!["a".into(), "b".into(), "a".into()]);
/// assert!(tour.is_closed());
/// assert_eq!(tour.start(), Some("a"));
/// assert_eq!(tour.num_stops(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tour {
    nodes: Vec<String>,
}

impl Tour {
    pub fn new(nodes: Vec<String>) -> Self {
        Self { nodes }
    }

    /// The empty tour carried by failed results.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Ordered node ids, start repeated at the end.
    pub fn ids(&self) -> &[String] {
        &self.nodes
    }

    /// Number of entries including the closing repeat.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct stops (`len - 1` for a closed tour).
    pub fn num_stops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<&str> {
        self.nodes.first().map(String::as_str)
    }

    /// `true` if the tour has at least two stops and returns to its start.
    pub fn is_closed(&self) -> bool {
        self.nodes.len() >= 3 && self.nodes.first() == self.nodes.last()
    }

    /// `true` if the tour is closed and visits each of `ids` exactly once.
    pub fn is_permutation_of<'a, I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        if !self.is_closed() {
            return false;
        }
        let expected: HashSet<&str> = ids.into_iter().collect();
        let stops = &self.nodes[..self.nodes.len() - 1];
        let seen: HashSet<&str> = stops.iter().map(String::as_str).collect();
        seen.len() == stops.len() && seen == expected
    }
}

/// A closed tour over dense graph indices, as returned by the solvers.
///
/// `path` holds `n + 1` indices with `path[0] == path[n]`; `distance` is the
/// sum of edge weights along it.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexTour {
    pub path: Vec<usize>,
    pub distance: f64,
}

impl IndexTour {
    /// Closes `order` (start first, without the return) and prices it.
    pub fn close(mut order: Vec<usize>, costs: &CostMatrix) -> Self {
        if let Some(&start) = order.first() {
            order.push(start);
        }
        let distance = costs.tour_cost(&order);
        Self {
            path: order,
            distance,
        }
    }

    /// Stops in visiting order, without the closing repeat.
    pub fn stops(&self) -> &[usize] {
        &self.path[..self.path.len().saturating_sub(1)]
    }
}
