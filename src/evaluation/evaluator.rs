//! Route evaluator that computes cost and checks feasibility.

use crate::models::{ProblemInstance, Route, RouteSet};

/// A type of constraint violation in a route set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationType {
    /// A route carries more deliveries than its vehicle allows.
    CapacityExceeded {
        /// Vehicle handle.
        vehicle: usize,
        /// Deliveries on the route.
        load: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// A delivery node appears more than once.
    Duplicated {
        /// Matrix node index.
        node: usize,
    },
    /// A delivery node is on no route.
    Missing {
        /// Matrix node index.
        node: usize,
    },
    /// A route references the depot or a node outside the instance.
    InvalidNode {
        /// Vehicle handle.
        vehicle: usize,
        /// Offending node.
        node: usize,
    },
    /// The route set does not have one route per vehicle.
    FleetMismatch {
        /// Routes in the set.
        routes: usize,
        /// Vehicles in the instance.
        vehicles: usize,
    },
}

/// A constraint violation in a route set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Computes route costs and checks capacity and coverage against a
/// problem instance.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Delivery, GeoPoint, ProblemInstance, RouteSet, Vehicle};
/// use u_dispatch::evaluation::RouteEvaluator;
///
/// let instance = ProblemInstance::new(
///     GeoPoint::ORIGIN,
///     vec![
///         Delivery::new("a", GeoPoint::new(0.01, 0.0)),
///         Delivery::new("b", GeoPoint::new(0.0, 0.01)),
///     ],
///     vec![Vehicle::new("v", 2)],
///     1.0,
/// )
/// .unwrap();
/// let routes = RouteSet::from_sequences(vec![vec![1, 2]]);
/// let evaluator = RouteEvaluator::new(&instance);
/// assert!(evaluator.violations(&routes).is_empty());
/// assert_eq!(evaluator.total_cost(&routes), instance.costs().tour_cost(&[1, 2]));
/// ```
pub struct RouteEvaluator<'a> {
    instance: &'a ProblemInstance,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given instance.
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self { instance }
    }

    /// Cost of a route including both depot legs, in metres.
    pub fn route_cost(&self, route: &Route) -> i64 {
        self.instance.costs().tour_cost(route.nodes())
    }

    /// Sum of route costs, in metres.
    pub fn total_cost(&self, routes: &RouteSet) -> i64 {
        routes.routes().iter().map(|r| self.route_cost(r)).sum()
    }

    /// Returns `true` if the route fits in its vehicle.
    pub fn is_route_feasible(&self, route: &Route) -> bool {
        let vehicle = &self.instance.vehicles()[route.vehicle()];
        route.is_empty() || route.load() <= vehicle.capacity()
    }

    /// Checks capacity on every route and that every delivery is served
    /// exactly once.
    pub fn violations(&self, routes: &RouteSet) -> Vec<Violation> {
        let mut violations = Vec::new();
        let vehicles = self.instance.vehicles();
        if routes.num_routes() != vehicles.len() {
            violations.push(Violation::new(ViolationType::FleetMismatch {
                routes: routes.num_routes(),
                vehicles: vehicles.len(),
            }));
            return violations;
        }

        let n = self.instance.num_nodes();
        let mut seen = vec![0usize; n];
        for route in routes.routes() {
            let vehicle = &vehicles[route.vehicle()];
            if !self.is_route_feasible(route) {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    vehicle: route.vehicle(),
                    load: route.load(),
                    capacity: vehicle.capacity(),
                }));
            }
            for &node in route.nodes() {
                if node == 0 || node >= n {
                    violations.push(Violation::new(ViolationType::InvalidNode {
                        vehicle: route.vehicle(),
                        node,
                    }));
                } else {
                    seen[node] += 1;
                }
            }
        }

        for (node, &count) in seen.iter().enumerate().skip(1) {
            match count {
                0 => violations.push(Violation::new(ViolationType::Missing { node })),
                1 => {}
                _ => violations.push(Violation::new(ViolationType::Duplicated { node })),
            }
        }

        violations
    }
}
