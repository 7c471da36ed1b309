//! Dense integer cost matrix.

use crate::models::GeoPoint;

use super::haversine_km;

/// Metres per kilometre; matrix entries are stored in metres.
pub const METERS_PER_KM: f64 = 1000.0;

/// A dense n×n matrix of non-negative integer costs (metres), stored in
/// row-major order. Node 0 is the depot.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::CostMatrix;
/// use u_dispatch::models::GeoPoint;
///
/// let points = [GeoPoint::ORIGIN, GeoPoint::new(0.01, 0.0), GeoPoint::new(0.0, 0.01)];
/// let cm = CostMatrix::from_points(&points, 1.0);
/// assert_eq!(cm.size(), 3);
/// assert_eq!(cm.get(0, 0), 0);
/// assert_eq!(cm.get(0, 1), 1112);
/// assert_eq!(cm.get(1, 0), cm.get(0, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMatrix {
    data: Vec<i64>,
    size: usize,
    symmetric: bool,
}

impl CostMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
            symmetric: true,
        }
    }

    /// Builds the traffic-scaled haversine matrix for `points`.
    ///
    /// `cost[i][j] = round(haversine_km(i, j) × traffic_factor × 1000)`,
    /// zero on the diagonal. Only the upper triangle is computed and then
    /// mirrored, so the result is exactly symmetric.
    pub fn from_points(points: &[GeoPoint], traffic_factor: f64) -> Self {
        let n = points.len();
        let mut cm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let c = scale_km(haversine_km(points[i], points[j]), traffic_factor);
                cm.data[i * n + j] = c;
                cm.data[j * n + i] = c;
            }
        }
        cm
    }

    /// Creates a matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size` or
    /// any entry is negative.
    pub fn from_data(size: usize, data: Vec<i64>) -> Option<Self> {
        if data.len() != size * size || data.iter().any(|&c| c < 0) {
            return None;
        }
        let mut cm = Self {
            data,
            size,
            symmetric: true,
        };
        cm.symmetric = cm.check_symmetric();
        Some(cm)
    }

    /// Cost of travelling from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `get(i, j) == get(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Largest single entry; zero for an empty matrix.
    pub fn max_cost(&self) -> i64 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Cost of the closed tour `0 → nodes… → 0`; zero for an empty slice.
    pub fn tour_cost(&self, nodes: &[usize]) -> i64 {
        if nodes.is_empty() {
            return 0;
        }
        let inner: i64 = nodes.windows(2).map(|w| self.get(w[0], w[1])).sum();
        self.get(0, nodes[0]) + inner + self.get(nodes[nodes.len() - 1], 0)
    }

    fn check_symmetric(&self) -> bool {
        (0..self.size).all(|i| ((i + 1)..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

/// Converts kilometres to traffic-scaled integer metres.
fn scale_km(km: f64, traffic_factor: f64) -> i64 {
    (km * traffic_factor * METERS_PER_KM).round() as i64
}

/// Converts integer metres back to kilometres.
pub fn meters_to_km(meters: i64) -> f64 {
    meters as f64 / METERS_PER_KM
}
