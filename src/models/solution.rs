//! Reported optimization result.

use serde::{Deserialize, Serialize};

/// One vehicle's entry in an [`OptimizationResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    /// Vehicle identifier.
    pub vehicle_id: String,
    /// Delivery indices (0-based into the input list) in visit order.
    pub delivery_sequence: Vec<usize>,
    /// Route length in kilometres, used as the time estimate.
    pub estimated_time: f64,
}

/// The externally reported solution: one entry per vehicle plus the
/// fleet-wide distance in kilometres.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{OptimizationResult, RouteSummary};
///
/// let result = OptimizationResult::new(
///     vec![RouteSummary {
///         vehicle_id: "v".into(),
///         delivery_sequence: vec![1, 0],
///         estimated_time: 3.2,
///     }],
///     3.2,
/// );
/// assert_eq!(result.num_served(), 2);
/// assert_eq!(result.route_for("v").map(|r| r.delivery_sequence.len()), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    routes: Vec<RouteSummary>,
    total_distance: f64,
}

impl OptimizationResult {
    /// Creates a result from its parts.
    pub fn new(routes: Vec<RouteSummary>, total_distance: f64) -> Self {
        Self {
            routes,
            total_distance,
        }
    }

    /// Per-vehicle routes in fleet order.
    pub fn routes(&self) -> &[RouteSummary] {
        &self.routes
    }

    /// Total distance in kilometres.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Looks up the route of a vehicle by identifier.
    pub fn route_for(&self, vehicle_id: &str) -> Option<&RouteSummary> {
        self.routes.iter().find(|r| r.vehicle_id == vehicle_id)
    }

    /// Number of deliveries across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.delivery_sequence.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_lookup() {
        let result = OptimizationResult::new(
            vec![
                RouteSummary {
                    vehicle_id: "a".into(),
                    delivery_sequence: vec![],
                    estimated_time: 0.0,
                },
                RouteSummary {
                    vehicle_id: "b".into(),
                    delivery_sequence: vec![0],
                    estimated_time: 1.5,
                },
            ],
            1.5,
        );
        assert_eq!(result.routes().len(), 2);
        assert!(result.route_for("c").is_none());
        assert_eq!(result.route_for("b").map(|r| r.estimated_time), Some(1.5));
        assert_eq!(result.total_distance(), 1.5);
    }
}
