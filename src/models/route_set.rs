//! One route per vehicle.

use serde::{Deserialize, Serialize};

use super::Route;

/// The routes of every vehicle in the fleet, indexed by vehicle handle.
///
/// Vehicles without work keep an empty route, so `routes()[v]` always
/// belongs to vehicle `v`.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::RouteSet;
///
/// let mut set = RouteSet::new(2);
/// set.route_mut(1).push(1);
/// assert_eq!(set.num_routes(), 2);
/// assert_eq!(set.num_served(), 1);
/// assert_eq!(set.route(1).nodes(), &[1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSet {
    routes: Vec<Route>,
}

impl RouteSet {
    /// Creates empty routes for `num_vehicles` vehicles.
    pub fn new(num_vehicles: usize) -> Self {
        Self {
            routes: (0..num_vehicles).map(Route::new).collect(),
        }
    }

    /// Builds a route set from explicit node sequences, one per vehicle.
    pub fn from_sequences(sequences: Vec<Vec<usize>>) -> Self {
        Self {
            routes: sequences
                .into_iter()
                .enumerate()
                .map(|(v, nodes)| Route::with_nodes(v, nodes))
                .collect(),
        }
    }

    /// All routes in vehicle order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// The route of vehicle `vehicle`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is out of range.
    pub fn route(&self, vehicle: usize) -> &Route {
        &self.routes[vehicle]
    }

    /// Mutable route of vehicle `vehicle`.
    pub fn route_mut(&mut self, vehicle: usize) -> &mut Route {
        &mut self.routes[vehicle]
    }

    /// Mutable borrows of two distinct routes at once.
    ///
    /// # Panics
    ///
    /// Panics if `a == b` or either handle is out of range.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> (&mut Route, &mut Route) {
        assert_ne!(a, b, "pair_mut needs two distinct routes");
        if a < b {
            let (left, right) = self.routes.split_at_mut(b);
            (&mut left[a], &mut right[0])
        } else {
            let (left, right) = self.routes.split_at_mut(a);
            (&mut right[0], &mut left[b])
        }
    }

    /// Number of routes (equals fleet size).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total deliveries served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Node sequences of every route, for snapshots and comparisons.
    pub fn sequences(&self) -> Vec<Vec<usize>> {
        self.routes.iter().map(|r| r.nodes().to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_set_empty() {
        let set = RouteSet::new(3);
        assert_eq!(set.num_routes(), 3);
        assert_eq!(set.num_served(), 0);
        for (v, r) in set.routes().iter().enumerate() {
            assert_eq!(r.vehicle(), v);
        }
    }

    #[test]
    fn test_from_sequences() {
        let set = RouteSet::from_sequences(vec![vec![2, 1], vec![], vec![3]]);
        assert_eq!(set.num_served(), 3);
        assert_eq!(set.route(2).vehicle(), 2);
        assert_eq!(set.sequences(), vec![vec![2, 1], vec![], vec![3]]);
    }

    #[test]
    fn test_pair_mut_both_orders() {
        let mut set = RouteSet::from_sequences(vec![vec![1], vec![2]]);
        {
            let (a, b) = set.pair_mut(0, 1);
            let n = a.remove(0);
            b.push(n);
        }
        assert_eq!(set.sequences(), vec![vec![], vec![2, 1]]);
        {
            let (a, b) = set.pair_mut(1, 0);
            let n = a.remove(0);
            b.push(n);
        }
        assert_eq!(set.sequences(), vec![vec![2], vec![1]]);
    }
}
