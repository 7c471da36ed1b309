//! Immutable problem instance.

use crate::distance::CostMatrix;
use crate::error::InputError;

use super::{Delivery, GeoPoint, Vehicle};

/// Depot, deliveries, fleet and the derived cost matrix for one solve.
///
/// Node 0 of the matrix is the depot and node `i + 1` is delivery `i`.
/// The instance is read-only once built and is `Send + Sync`, so every
/// pipeline stage can borrow it freely.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Delivery, GeoPoint, ProblemInstance, Vehicle};
///
/// let instance = ProblemInstance::new(
///     GeoPoint::ORIGIN,
///     vec![Delivery::new("a", GeoPoint::new(0.01, 0.0))],
///     vec![Vehicle::new("v", 5)],
///     1.0,
/// )
/// .unwrap();
/// assert_eq!(instance.num_deliveries(), 1);
/// assert_eq!(instance.num_nodes(), 2);
/// assert_eq!(instance.cost(0, 1), 1112);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    depot: GeoPoint,
    deliveries: Vec<Delivery>,
    vehicles: Vec<Vehicle>,
    traffic_factor: f64,
    costs: CostMatrix,
}

impl ProblemInstance {
    /// Builds an instance and its cost matrix.
    ///
    /// Rejects non-finite coordinates, a negative or non-finite traffic
    /// factor, and a factor so large that summing route costs could
    /// overflow. Vehicle capacities are taken as given; vehicles
    /// with capacity `<= 0` are simply never assigned work.
    pub fn new(
        depot: GeoPoint,
        deliveries: Vec<Delivery>,
        vehicles: Vec<Vehicle>,
        traffic_factor: f64,
    ) -> Result<Self, InputError> {
        if !traffic_factor.is_finite() || traffic_factor < 0.0 {
            return Err(InputError::InvalidTrafficFactor(traffic_factor));
        }
        let points: Vec<GeoPoint> = std::iter::once(depot)
            .chain(deliveries.iter().map(Delivery::location))
            .collect();
        if let Some(node) = points.iter().position(|p| !p.is_finite()) {
            return Err(InputError::NonFiniteCoordinate { node });
        }

        let costs = CostMatrix::from_points(&points, traffic_factor);
        // A route set has at most 2N legs; their sum must fit in an i64.
        let max_legs = 2 * i64::try_from(deliveries.len()).unwrap_or(i64::MAX / 2) + 1;
        if costs.max_cost().checked_mul(max_legs).is_none() {
            return Err(InputError::InvalidTrafficFactor(traffic_factor));
        }

        Ok(Self {
            depot,
            deliveries,
            vehicles,
            traffic_factor,
            costs,
        })
    }

    /// Depot location.
    pub fn depot(&self) -> GeoPoint {
        self.depot
    }

    /// Deliveries in input order (node `i + 1` is `deliveries()[i]`).
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    /// Fleet in input order; a vehicle's handle is its index here.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Number of deliveries (excluding the depot).
    pub fn num_deliveries(&self) -> usize {
        self.deliveries.len()
    }

    /// Number of matrix nodes (deliveries plus depot).
    pub fn num_nodes(&self) -> usize {
        self.deliveries.len() + 1
    }

    /// Traffic multiplier the matrix was built with.
    pub fn traffic_factor(&self) -> f64 {
        self.traffic_factor
    }

    /// The cost matrix.
    pub fn costs(&self) -> &CostMatrix {
        &self.costs
    }

    /// Cost between two nodes, in metres.
    #[inline]
    pub fn cost(&self, from: usize, to: usize) -> i64 {
        self.costs.get(from, to)
    }

    /// Demand of a node (0 for the depot).
    pub fn demand(&self, node: usize) -> i32 {
        if node == 0 {
            0
        } else {
            self.deliveries[node - 1].demand()
        }
    }

    /// Sum of demand over all deliveries.
    pub fn total_demand(&self) -> i64 {
        self.deliveries.iter().map(|d| i64::from(d.demand())).sum()
    }

    /// Sum of positive capacities over the fleet.
    pub fn fleet_capacity(&self) -> i64 {
        self.vehicles
            .iter()
            .filter(|v| v.is_usable())
            .map(|v| i64::from(v.capacity()))
            .sum()
    }
}
