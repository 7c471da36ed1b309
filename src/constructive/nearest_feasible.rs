//! Nearest-feasible insertion constructive heuristic.
//!
//! Builds routes vehicle by vehicle: starting from the depot, always append
//! the unassigned delivery closest to the route's current end that still
//! fits in the vehicle. When nothing fits, move on to the next vehicle.
//!
//! # Complexity
//!
//! O(V·D²) where V = vehicles and D = deliveries.

use log::{debug, warn};

use crate::error::InfeasibleError;
use crate::models::{ProblemInstance, RouteSet};

/// Constructs an initial route set with nearest-feasible insertion.
///
/// Vehicles are filled in fleet order. Among equally close candidates the
/// lowest delivery index wins, so the output is fully deterministic.
/// Vehicles with capacity `<= 0` keep an empty route.
///
/// Returns [`InfeasibleError`] listing every delivery (0-based) left over
/// once all vehicles are full.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Delivery, GeoPoint, ProblemInstance, Vehicle};
/// use u_dispatch::constructive::nearest_feasible_insertion;
///
/// let instance = ProblemInstance::new(
///     GeoPoint::ORIGIN,
///     vec![
///         Delivery::new("far", GeoPoint::new(0.03, 0.0)),
///         Delivery::new("near", GeoPoint::new(0.01, 0.0)),
///         Delivery::new("mid", GeoPoint::new(0.02, 0.0)),
///     ],
///     vec![Vehicle::new("v", 3)],
///     1.0,
/// )
/// .unwrap();
///
/// let routes = nearest_feasible_insertion(&instance).unwrap();
/// assert_eq!(routes.route(0).nodes(), &[2, 3, 1]);
/// ```
pub fn nearest_feasible_insertion(instance: &ProblemInstance) -> Result<RouteSet, InfeasibleError> {
    let n = instance.num_nodes();
    let mut assigned = vec![false; n];
    assigned[0] = true;
    let mut remaining = instance.num_deliveries();
    let mut routes = RouteSet::new(instance.vehicles().len());

    for (handle, vehicle) in instance.vehicles().iter().enumerate() {
        if remaining == 0 {
            break;
        }
        if !vehicle.is_usable() {
            warn!(
                "vehicle {} has capacity {}, excluded from assignment",
                vehicle.id(),
                vehicle.capacity()
            );
            continue;
        }

        let route = routes.route_mut(handle);
        let mut load = 0;

        while remaining > 0 {
            let from = route.tail();
            let mut best: Option<(usize, i64)> = None;
            for node in 1..n {
                if assigned[node] || !vehicle.fits(load, instance.demand(node)) {
                    continue;
                }
                let c = instance.cost(from, node);
                if best.map_or(true, |(_, bc)| c < bc) {
                    best = Some((node, c));
                }
            }

            let Some((next, _)) = best else { break };
            assigned[next] = true;
            remaining -= 1;
            load += instance.demand(next);
            route.push(next);
        }

        debug!(
            "vehicle {} constructed with {} deliveries",
            vehicle.id(),
            route.len()
        );
    }

    if remaining > 0 {
        let unplaced: Vec<usize> = (1..n).filter(|&i| !assigned[i]).map(|i| i - 1).collect();
        warn!(
            "{} of {} deliveries exceed fleet capacity",
            unplaced.len(),
            instance.num_deliveries()
        );
        return Err(InfeasibleError::new(unplaced));
    }

    Ok(routes)
}
