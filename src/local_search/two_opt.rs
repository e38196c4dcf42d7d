//! 2-opt tour improvement.
//!
//! # Algorithm
//!
//! For each pair of positions `i < j` among the stops after the start,
//! compute the change in length from reversing the segment between them:
//!
//! ```text
//! delta = c(t[i-1], t[j]) + c(t[i], t[j+1]) - c(t[i-1], t[i]) - c(t[j], t[j+1])
//! ```
//!
//! If delta < 0, reverse the segment `[i..=j]` and accept the improvement.
//! Repeat until no further improvements are found (first-improvement
//! strategy). On asymmetric matrices reversing a segment also changes the
//! direction of its inner edges, so moves are priced by re-evaluating the
//! whole tour instead.
//!
//! # Complexity
//!
//! O(n²) per pass (O(n³) for asymmetric matrices), O(n³) passes worst case.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::CostMatrix;
use crate::models::IndexTour;

const EPS: f64 = 1e-10;

/// Applies 2-opt to a closed tour and returns the improved tour.
///
/// The input is left untouched; the start node stays in place. The result
/// is never longer than the input.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::CostMatrix;
/// use u_tsp::local_search::two_opt_improve;
/// use u_tsp::models::IndexTour;
///
/// // unit square, crossing tour 0→2→1→3→0
/// let d = 2f64.sqrt();
/// let cm = CostMatrix::from_data(4, vec![
///     0.0, 1.0, d, 1.0,
///     1.0, 0.0, 1.0, d,
///     d, 1.0, 0.0, 1.0,
///     1.0, d, 1.0, 0.0,
/// ]).unwrap();
/// let crossing = IndexTour::close(vec![0, 2, 1, 3], &cm);
/// let improved = two_opt_improve(&crossing, &cm);
/// assert!((improved.distance - 4.0).abs() < 1e-10);
/// ```
pub fn two_opt_improve(tour: &IndexTour, costs: &CostMatrix) -> IndexTour {
    // stops without the closing repeat: t[0] is the start
    let mut current = tour.stops().to_vec();
    if current.len() < 4 {
        return tour.clone();
    }
    let symmetric = costs.is_symmetric(EPS);
    let mut distance = closed_length(&current, costs);
    let mut improved = true;

    while improved {
        improved = false;
        let n = current.len();

        for i in 1..n - 1 {
            for j in i + 1..n {
                if symmetric {
                    let delta = two_opt_delta(&current, costs, i, j);
                    if delta < -EPS {
                        current[i..=j].reverse();
                        distance += delta;
                        improved = true;
                    }
                } else {
                    current[i..=j].reverse();
                    let candidate = closed_length(&current, costs);
                    if candidate < distance - EPS {
                        distance = candidate;
                        improved = true;
                    } else {
                        current[i..=j].reverse();
                    }
                }
            }
        }
    }

    let result = IndexTour::close(current, costs);
    log::trace!("2-opt: {:.3} -> {:.3}", tour.distance, result.distance);
    if result.distance <= tour.distance {
        result
    } else {
        tour.clone()
    }
}

/// Distance change from reversing `t[i..=j]` on a symmetric matrix.
///
/// Before: ...-t[i-1] - t[i] - ... - t[j] - t[j+1]-...
/// After:  ...-t[i-1] - t[j] - ... - t[i] - t[j+1]-...
fn two_opt_delta(t: &[usize], costs: &CostMatrix, i: usize, j: usize) -> f64 {
    let prev_i = t[i - 1];
    let next_j = if j == t.len() - 1 { t[0] } else { t[j + 1] };

    let old_cost = costs.get(prev_i, t[i]) + costs.get(t[j], next_j);
    let new_cost = costs.get(prev_i, t[j]) + costs.get(t[i], next_j);

    new_cost - old_cost
}

/// Length of `t[0] → ... → t[n-1] → t[0]`.
fn closed_length(t: &[usize], costs: &CostMatrix) -> f64 {
    costs.tour_cost(t) + t.last().map_or(0.0, |&last| costs.get(last, t[0]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::models::{Conditions, Node};

    fn graph_of(points: &[(f64, f64)]) -> Graph {
        let nodes = points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Node::new(format!("n{i}"), x, y))
            .collect();
        Graph::build(nodes, &Conditions::new()).expect("valid")
    }

    #[test]
    fn test_2opt_already_optimal() {
        let g = graph_of(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let t = IndexTour::close(vec![0, 1, 2, 3], g.costs());
        let improved = two_opt_improve(&t, g.costs());
        assert_eq!(improved.path, vec![0, 1, 2, 3, 0]);
        assert!((improved.distance - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_2opt_reverses_crossing() {
        let g = graph_of(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let crossing = IndexTour::close(vec![0, 2, 1, 3], g.costs());
        let improved = two_opt_improve(&crossing, g.costs());
        assert!((improved.distance - 4.0).abs() < 1e-10);
        assert_eq!(improved.path[0], 0);
        // input is untouched
        assert_eq!(crossing.path, vec![0, 2, 1, 3, 0]);
    }

    #[test]
    fn test_2opt_small_tours_unchanged() {
        let g = graph_of(&[(0.0, 0.0), (1.0, 0.0), (0.0, 2.0)]);
        let t = IndexTour::close(vec![0, 2, 1], g.costs());
        assert_eq!(two_opt_improve(&t, g.costs()), t);
    }

    #[test]
    fn test_2opt_does_not_worsen() {
        let g = graph_of(&[
            (5.0, 5.0),
            (0.0, 0.0),
            (10.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
        ]);
        let initial = IndexTour::close(vec![0, 1, 4, 2, 3], g.costs());
        let improved = two_opt_improve(&initial, g.costs());
        assert!(improved.distance <= initial.distance + 1e-10);
        assert!((g.costs().tour_cost(&improved.path) - improved.distance).abs() < 1e-9);
    }

    #[test]
    fn test_2opt_asymmetric() {
        // cheap ring 0→1→2→3→0, expensive otherwise
        let mut data = vec![5.0; 16];
        for i in 0..4 {
            data[i * 4 + i] = 0.0;
            data[i * 4 + (i + 1) % 4] = 1.0;
        }
        let cm = CostMatrix::from_data(4, data).expect("valid");
        let t = IndexTour::close(vec![0, 2, 1, 3], &cm);
        let improved = two_opt_improve(&t, &cm);
        assert!(improved.distance <= t.distance);
        assert!((cm.tour_cost(&improved.path) - improved.distance).abs() < 1e-10);
    }
}
