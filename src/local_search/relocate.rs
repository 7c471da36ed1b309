//! Inter-route delivery relocation operator.
//!
//! # Algorithm
//!
//! Walks every route in vehicle order and every delivery in sequence order.
//! Each delivery is tentatively removed and re-inserted at its cheapest
//! position in every other route with spare capacity. The best destination
//! is applied if it strictly lowers the combined cost of the two routes.
//!
//! # Complexity
//!
//! O(n² × R) per pass where n = deliveries per route, R = number of routes.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use log::trace;

use crate::distance::CostMatrix;
use crate::models::{ProblemInstance, RouteSet};

/// A relocate move: move a delivery from one route to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RelocateMove {
    to_route: usize,
    to_pos: usize,
    delta: i64,
}

/// Runs one relocation pass over the route set, applying every strictly
/// improving move found along the way.
///
/// Capacity of the destination vehicle is always respected. Returns the
/// number of moves applied.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Delivery, GeoPoint, ProblemInstance, RouteSet, Vehicle};
/// use u_dispatch::evaluation::RouteEvaluator;
/// use u_dispatch::local_search::relocate_pass;
///
/// let instance = ProblemInstance::new(
///     GeoPoint::ORIGIN,
///     vec![
///         Delivery::new("a", GeoPoint::new(0.02, 0.0)),
///         Delivery::new("b", GeoPoint::new(0.0, 0.02)),
///         Delivery::new("c", GeoPoint::new(0.02, 0.001)),
///     ],
///     vec![Vehicle::new("x", 3), Vehicle::new("y", 3)],
///     1.0,
/// )
/// .unwrap();
///
/// // Delivery c sits next to a but was given to the other vehicle.
/// let mut routes = RouteSet::from_sequences(vec![vec![1], vec![2, 3]]);
/// let before = RouteEvaluator::new(&instance).total_cost(&routes);
/// assert!(relocate_pass(&mut routes, &instance) > 0);
/// assert!(RouteEvaluator::new(&instance).total_cost(&routes) < before);
/// ```
pub fn relocate_pass(routes: &mut RouteSet, instance: &ProblemInstance) -> usize {
    if routes.num_routes() < 2 {
        return 0;
    }

    let costs = instance.costs();
    let vehicles = instance.vehicles();
    let mut applied = 0;

    for from in 0..routes.num_routes() {
        let mut pos = 0;
        while pos < routes.route(from).len() {
            let nodes = routes.route(from).nodes();
            let node = nodes[pos];
            let removal_delta = removal_cost(nodes, pos, costs);
            let demand = instance.demand(node);

            let mut best: Option<RelocateMove> = None;
            for (to, target) in routes.routes().iter().enumerate() {
                if to == from || !vehicles[to].fits(target.load(), demand) {
                    continue;
                }
                let (to_pos, insertion_delta) = best_insertion(target.nodes(), node, costs);
                let delta = removal_delta + insertion_delta;
                if best.map_or(true, |b| delta < b.delta) {
                    best = Some(RelocateMove {
                        to_route: to,
                        to_pos,
                        delta,
                    });
                }
            }

            match best {
                Some(mv) if mv.delta < 0 => {
                    let (source, target) = routes.pair_mut(from, mv.to_route);
                    let moved = source.remove(pos);
                    target.insert(mv.to_pos, moved);
                    applied += 1;
                    trace!(
                        "relocated node {moved} from route {from} to route {} at {}, delta {}",
                        mv.to_route,
                        mv.to_pos,
                        mv.delta
                    );
                }
                _ => pos += 1,
            }
        }
    }

    applied
}

/// Cost change from removing the node at `pos` from `route`.
fn removal_cost(route: &[usize], pos: usize, costs: &CostMatrix) -> i64 {
    let prev = if pos == 0 { 0 } else { route[pos - 1] };
    let next = if pos == route.len() - 1 {
        0
    } else {
        route[pos + 1]
    };
    let node = route[pos];

    // Old: prev → node → next
    // New: prev → next
    costs.get(prev, next) - costs.get(prev, node) - costs.get(node, next)
}

/// Cost change from inserting `node` at `pos` in `route`.
fn insertion_cost(route: &[usize], pos: usize, node: usize, costs: &CostMatrix) -> i64 {
    let prev = if pos == 0 { 0 } else { route[pos - 1] };
    let next = if pos == route.len() { 0 } else { route[pos] };

    // Old: prev → next
    // New: prev → node → next
    costs.get(prev, node) + costs.get(node, next) - costs.get(prev, next)
}

/// Cheapest insertion position for `node`; the earliest position wins ties.
fn best_insertion(route: &[usize], node: usize, costs: &CostMatrix) -> (usize, i64) {
    let mut best = (0, insertion_cost(route, 0, node, costs));
    for pos in 1..=route.len() {
        let c = insertion_cost(route, pos, node, costs);
        if c < best.1 {
            best = (pos, c);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::RouteEvaluator;
    use crate::models::{Delivery, GeoPoint, Vehicle};

    fn explicit_matrix() -> CostMatrix {
        CostMatrix::from_data(
            4,
            vec![
                0, 5, 8, 12, //
                5, 0, 3, 7, //
                8, 3, 0, 4, //
                12, 7, 4, 0,
            ],
        )
        .expect("valid")
    }

    fn instance(vehicles: Vec<Vehicle>) -> ProblemInstance {
        ProblemInstance::new(
            GeoPoint::ORIGIN,
            vec![
                Delivery::new("east", GeoPoint::new(0.0, 0.02)),
                Delivery::new("north", GeoPoint::new(0.02, 0.0)),
                Delivery::new("north-east", GeoPoint::new(0.021, 0.001)),
            ],
            vehicles,
            1.0,
        )
        .expect("valid")
    }

    #[test]
    fn test_removal_cost() {
        // Removing node 2 from 1→2→3: d(1,3) - d(1,2) - d(2,3) = 7 - 3 - 4
        assert_eq!(removal_cost(&[1, 2, 3], 1, &explicit_matrix()), 0);
        // Removing the only node: d(0,0) - 2·d(0,2)
        assert_eq!(removal_cost(&[2], 0, &explicit_matrix()), -16);
    }

    #[test]
    fn test_insertion_cost() {
        // Inserting 2 between 1 and 3: d(1,2) + d(2,3) - d(1,3) = 3 + 4 - 7
        assert_eq!(insertion_cost(&[1, 3], 1, 2, &explicit_matrix()), 0);
        // Into an empty route: out and back
        assert_eq!(insertion_cost(&[], 0, 3, &explicit_matrix()), 24);
    }

    #[test]
    fn test_best_insertion_prefers_earliest() {
        let (pos, delta) = best_insertion(&[1, 3], 2, &explicit_matrix());
        assert_eq!(pos, 1);
        assert_eq!(delta, 0);
    }

    #[test]
    fn test_relocate_single_route_noop() {
        let p = instance(vec![Vehicle::new("only", 5)]);
        let mut routes = RouteSet::from_sequences(vec![vec![1, 2, 3]]);
        assert_eq!(relocate_pass(&mut routes, &p), 0);
    }

    #[test]
    fn test_relocate_merges_neighbours() {
        let p = instance(vec![Vehicle::new("a", 5), Vehicle::new("b", 5)]);
        let mut routes = RouteSet::from_sequences(vec![vec![1, 3], vec![2]]);
        let eval = RouteEvaluator::new(&p);
        let before = eval.total_cost(&routes);
        assert!(relocate_pass(&mut routes, &p) > 0);
        assert!(eval.total_cost(&routes) < before);
        assert!(eval.violations(&routes).is_empty());
    }

    #[test]
    fn test_relocate_respects_capacity() {
        let p = instance(vec![Vehicle::new("a", 2), Vehicle::new("b", 1)]);
        let mut routes = RouteSet::from_sequences(vec![vec![1, 3], vec![2]]);
        relocate_pass(&mut routes, &p);
        let eval = RouteEvaluator::new(&p);
        assert!(eval.violations(&routes).is_empty());
        assert!(routes.route(1).len() <= 1);
    }

    #[test]
    fn test_relocate_never_targets_unusable_vehicle() {
        let p = instance(vec![Vehicle::new("a", 3), Vehicle::new("broken", 0)]);
        let mut routes = RouteSet::from_sequences(vec![vec![1, 2, 3], vec![]]);
        relocate_pass(&mut routes, &p);
        assert!(routes.route(1).is_empty());
    }
}
