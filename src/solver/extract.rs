//! Conversion of a final route set into the reported result.

use crate::distance::meters_to_km;
use crate::evaluation::RouteEvaluator;
use crate::models::{OptimizationResult, ProblemInstance, RouteSet, RouteSummary};

/// Builds the externally reported result from a route set.
///
/// Every vehicle gets an entry, in fleet order, even when its route is
/// empty. Sequences hold 0-based delivery indices. A route's estimated
/// time is its own length in kilometres; the total is the sum over all
/// routes, converted from metres.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Delivery, GeoPoint, ProblemInstance, RouteSet, Vehicle};
/// use u_dispatch::solver::extract;
///
/// let instance = ProblemInstance::new(
///     GeoPoint::ORIGIN,
///     vec![Delivery::new("a", GeoPoint::new(0.01, 0.0))],
///     vec![Vehicle::new("v", 1), Vehicle::new("idle", 1)],
///     1.0,
/// )
/// .unwrap();
/// let routes = RouteSet::from_sequences(vec![vec![1], vec![]]);
///
/// let result = extract(&instance, &routes);
/// assert_eq!(result.routes()[0].delivery_sequence, vec![0]);
/// assert!(result.routes()[1].delivery_sequence.is_empty());
/// assert!((result.total_distance() - 2.224).abs() < 1e-9);
/// ```
pub fn extract(instance: &ProblemInstance, routes: &RouteSet) -> OptimizationResult {
    let evaluator = RouteEvaluator::new(instance);
    let mut total = 0;
    let summaries = routes
        .routes()
        .iter()
        .map(|route| {
            let cost = evaluator.route_cost(route);
            total += cost;
            RouteSummary {
                vehicle_id: instance.vehicles()[route.vehicle()].id().to_string(),
                delivery_sequence: route.delivery_indices(),
                estimated_time: meters_to_km(cost),
            }
        })
        .collect();

    OptimizationResult::new(summaries, meters_to_km(total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Delivery, GeoPoint, Vehicle};

    #[test]
    fn test_extract_totals_match_routes() {
        let p = ProblemInstance::new(
            GeoPoint::ORIGIN,
            vec![
                Delivery::new("a", GeoPoint::new(0.01, 0.0)),
                Delivery::new("b", GeoPoint::new(0.0, 0.01)),
                Delivery::new("c", GeoPoint::new(-0.01, 0.0)),
            ],
            vec![Vehicle::new("x", 2), Vehicle::new("y", 2)],
            1.5,
        )
        .expect("valid");
        let routes = RouteSet::from_sequences(vec![vec![2, 1], vec![3]]);
        let result = extract(&p, &routes);

        assert_eq!(result.routes()[0].vehicle_id, "x");
        assert_eq!(result.routes()[0].delivery_sequence, vec![1, 0]);
        assert_eq!(result.routes()[1].delivery_sequence, vec![2]);

        let sum: f64 = result.routes().iter().map(|r| r.estimated_time).sum();
        assert!((result.total_distance() - sum).abs() < 1e-9);
        let expected = (p.costs().tour_cost(&[2, 1]) + p.costs().tour_cost(&[3])) as f64 / 1000.0;
        assert!((result.total_distance() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_extract_no_deliveries() {
        let p = ProblemInstance::new(GeoPoint::ORIGIN, vec![], vec![Vehicle::new("x", 2)], 1.0)
            .expect("valid");
        let result = extract(&p, &RouteSet::new(1));
        assert_eq!(result.routes().len(), 1);
        assert_eq!(result.total_distance(), 0.0);
        assert_eq!(result.routes()[0].estimated_time, 0.0);
    }
}
