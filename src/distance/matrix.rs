//! Dense cost matrix.

/// A dense n×n cost matrix stored in row-major order.
///
/// Entries are non-negative edge weights. `f64::INFINITY` marks a missing
/// edge; it only appears when a matrix is supplied explicitly, never when
/// weights are derived from node geometry.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::CostMatrix;
///
/// let cm = CostMatrix::from_data(3, vec![
///     0.0, 5.0, 8.0,
///     5.0, 0.0, 4.0,
///     8.0, 4.0, 0.0,
/// ]).unwrap();
/// assert!((cm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(cm.size(), 3);
/// assert!((cm.tour_cost(&[0, 1, 2, 0]) - 17.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    data: Vec<f64>,
    size: usize,
}

impl CostMatrix {
    /// Creates a cost matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a cost matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`, a
    /// diagonal entry is non-zero, or any entry is negative or NaN.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        if data.iter().any(|&v| v.is_nan() || v < 0.0) {
            return None;
        }
        if (0..size).any(|i| data[i * size + i] != 0.0) {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the cost from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the cost from location `from` to location `to`.
    pub(crate) fn set(&mut self, from: usize, to: usize, cost: f64) {
        self.data[from * self.size + to] = cost;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let (a, b) = (self.get(i, j), self.get(j, i));
                if a.is_infinite() || b.is_infinite() {
                    if a != b {
                        return false;
                    }
                } else if (a - b).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns `true` if every off-diagonal entry is finite.
    pub fn is_complete(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Returns the nearest neighbor of `from` among the given candidates.
    ///
    /// Ties resolve to the earliest candidate. Returns `None` if `candidates`
    /// is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.get(from, a).total_cmp(&self.get(from, b)))
    }

    /// Sum of consecutive edge costs along `path`.
    pub fn tour_cost(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }

    /// Cheapest edge leaving `from` towards any other location.
    ///
    /// `f64::INFINITY` if the location has no finite outgoing edge.
    pub fn min_outgoing(&self, from: usize) -> f64 {
        (0..self.size)
            .filter(|&to| to != from)
            .map(|to| self.get(from, to))
            .fold(f64::INFINITY, f64::min)
    }

    /// Cheaper of the two directions between `a` and `b`.
    pub fn undirected(&self, a: usize, b: usize) -> f64 {
        self.get(a, b).min(self.get(b, a))
    }
}
