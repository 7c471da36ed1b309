//! Wire-format request types and their conversion into a problem instance.
//!
//! Mirrors the JSON payload of the dispatch service:
//!
//! ```json
//! {
//!   "deliveries": [{ "id": "d1", "address": "…", "location": { "type": "Point", "coordinates": [12.97, 77.59] }, "priority": 1 }],
//!   "vehicles":   [{ "vehicleId": "v1", "capacity": 10, "currentLocation": { "type": "Point", "coordinates": [12.9, 77.5] } }],
//!   "trafficData": { "multiplier": 1.3 }
//! }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::models::{Delivery, GeoPoint, ProblemInstance, Vehicle};

/// Order of the two numbers in a `coordinates` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoordinateOrder {
    /// `[lat, lon]`, as the dispatch service has always read them.
    #[default]
    LatLon,
    /// `[lon, lat]`, GeoJSON order.
    LonLat,
}

impl CoordinateOrder {
    fn point(self, a: f64, b: f64) -> GeoPoint {
        match self {
            CoordinateOrder::LatLon => GeoPoint::new(a, b),
            CoordinateOrder::LonLat => GeoPoint::new(b, a),
        }
    }
}

/// A GeoJSON-like point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Geometry type, normally `"Point"`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Two coordinates in the agreed [`CoordinateOrder`].
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

/// A delivery as received on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryInput {
    /// Identifier.
    #[serde(alias = "_id")]
    pub id: String,
    /// Street address; informational.
    #[serde(default)]
    pub address: String,
    /// Drop-off point.
    pub location: GeoLocation,
    /// Informational priority.
    #[serde(default)]
    pub priority: i32,
}

/// A vehicle as received on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInput {
    /// Identifier.
    pub vehicle_id: String,
    /// Maximum number of deliveries.
    pub capacity: i32,
    /// Last reported position.
    #[serde(default)]
    pub current_location: Option<GeoLocation>,
}

/// Traffic conditions for the request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficData {
    /// Distance multiplier (1.0 = free flow).
    pub multiplier: f64,
}

impl Default for TrafficData {
    fn default() -> Self {
        Self { multiplier: 1.0 }
    }
}

/// A full optimization request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationRequest {
    /// Deliveries in the order their indices are reported back.
    #[serde(default)]
    pub deliveries: Vec<DeliveryInput>,
    /// The fleet.
    #[serde(default)]
    pub vehicles: Vec<VehicleInput>,
    /// Traffic multiplier; free flow when absent.
    #[serde(default)]
    pub traffic_data: TrafficData,
}

impl OptimizationRequest {
    /// Validates the request and builds a problem instance with the depot
    /// at (0, 0).
    ///
    /// # Examples
    ///
    /// ```
    /// use u_dispatch::request::{
    ///     CoordinateOrder, DeliveryInput, GeoLocation, OptimizationRequest, TrafficData,
    ///     VehicleInput,
    /// };
    ///
    /// let request = OptimizationRequest {
    ///     deliveries: vec![DeliveryInput {
    ///         id: "d1".into(),
    ///         address: String::new(),
    ///         location: GeoLocation { kind: "Point".into(), coordinates: vec![0.01, 0.0] },
    ///         priority: 0,
    ///     }],
    ///     vehicles: vec![VehicleInput {
    ///         vehicle_id: "v1".into(),
    ///         capacity: 4,
    ///         current_location: None,
    ///     }],
    ///     traffic_data: TrafficData { multiplier: 1.0 },
    /// };
    /// let instance = request.into_instance(CoordinateOrder::LatLon).unwrap();
    /// assert_eq!(instance.cost(0, 1), 1112);
    /// ```
    pub fn into_instance(self, order: CoordinateOrder) -> Result<ProblemInstance, InputError> {
        if self.vehicles.is_empty() {
            return Err(InputError::NoVehicles);
        }

        let multiplier = self.traffic_data.multiplier;
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(InputError::InvalidTrafficFactor(multiplier));
        }

        let mut seen = HashSet::new();
        let mut vehicles = Vec::with_capacity(self.vehicles.len());
        for input in self.vehicles {
            if input.capacity < 0 {
                return Err(InputError::NegativeCapacity {
                    vehicle: input.vehicle_id,
                });
            }
            if !seen.insert(input.vehicle_id.clone()) {
                return Err(InputError::DuplicateVehicleId(input.vehicle_id));
            }
            let mut vehicle = Vehicle::new(input.vehicle_id, input.capacity);
            // An unreadable current location is ignored: routing never uses it.
            if let Some(point) = input
                .current_location
                .and_then(|loc| parse_point(&loc.coordinates, order))
            {
                vehicle = vehicle.with_current_location(point);
            }
            vehicles.push(vehicle);
        }

        let deliveries = self
            .deliveries
            .into_iter()
            .enumerate()
            .map(|(i, input)| -> Result<Delivery, InputError> {
                let coords = &input.location.coordinates;
                let point = parse_point(coords, order).ok_or(InputError::MalformedLocation {
                    delivery: i,
                    len: coords.len(),
                })?;
                if !point.is_finite() {
                    return Err(InputError::NonFiniteCoordinate { node: i + 1 });
                }
                Ok(Delivery::new(input.id, point).with_priority(input.priority))
            })
            .collect::<Result<Vec<_>, _>>()?;

        ProblemInstance::new(GeoPoint::ORIGIN, deliveries, vehicles, multiplier)
    }
}

fn parse_point(coordinates: &[f64], order: CoordinateOrder) -> Option<GeoPoint> {
    match coordinates {
        [a, b] => Some(order.point(*a, *b)),
        _ => None,
    }
}

/// Failure of [`solve_json`].
#[cfg(feature = "json")]
#[derive(Debug)]
pub enum JsonSolveError {
    /// The payload is not a valid request, or the result failed to encode.
    Json(serde_json::Error),
    /// The request was understood but could not be solved.
    Solve(crate::error::SolveError),
}

#[cfg(feature = "json")]
impl std::fmt::Display for JsonSolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonSolveError::Json(e) => write!(f, "json: {e}"),
            JsonSolveError::Solve(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(feature = "json")]
impl std::error::Error for JsonSolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JsonSolveError::Json(e) => Some(e),
            JsonSolveError::Solve(e) => Some(e),
        }
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for JsonSolveError {
    fn from(e: serde_json::Error) -> Self {
        JsonSolveError::Json(e)
    }
}

#[cfg(feature = "json")]
impl From<crate::error::SolveError> for JsonSolveError {
    fn from(e: crate::error::SolveError) -> Self {
        JsonSolveError::Solve(e)
    }
}

#[cfg(feature = "json")]
impl From<InputError> for JsonSolveError {
    fn from(e: InputError) -> Self {
        JsonSolveError::Solve(e.into())
    }
}

/// Parses a JSON request, solves it, and returns the JSON result
/// (`{ "routes": [...], "totalDistance": ... }`).
#[cfg(feature = "json")]
pub fn solve_json(
    payload: &str,
    order: CoordinateOrder,
    config: &crate::solver::SolverConfig,
) -> Result<String, JsonSolveError> {
    let request: OptimizationRequest = serde_json::from_str(payload)?;
    let instance = request.into_instance(order)?;
    let outcome = crate::solver::Solver::new(config.clone()).solve(&instance)?;
    Ok(serde_json::to_string(&outcome.result)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "deliveries": [
            { "_id": "d1", "address": "1 Main St", "location": { "type": "Point", "coordinates": [0.01, 0.02] }, "priority": 2 },
            { "id": "d2", "location": { "type": "Point", "coordinates": [0.0, 0.01] } }
        ],
        "vehicles": [
            { "vehicleId": "v1", "capacity": 2, "currentLocation": { "type": "Point", "coordinates": [0.1, 0.2] } },
            { "vehicleId": "v2", "capacity": 0 }
        ],
        "trafficData": { "multiplier": 1.5 }
    }"#;

    fn request() -> OptimizationRequest {
        serde_json::from_str(PAYLOAD).expect("valid payload")
    }

    #[test]
    fn test_parse_payload() {
        let r = request();
        assert_eq!(r.deliveries.len(), 2);
        assert_eq!(r.deliveries[0].id, "d1");
        assert_eq!(r.deliveries[0].priority, 2);
        assert_eq!(r.deliveries[1].address, "");
        assert_eq!(r.vehicles[1].current_location, None);
        assert_eq!(r.traffic_data.multiplier, 1.5);
    }

    #[test]
    fn test_into_instance_lat_lon() {
        let p = request().into_instance(CoordinateOrder::LatLon).expect("valid");
        assert_eq!(p.depot(), GeoPoint::ORIGIN);
        assert_eq!(p.deliveries()[0].location(), GeoPoint::new(0.01, 0.02));
        assert_eq!(p.deliveries()[0].priority(), 2);
        assert_eq!(p.vehicles()[0].current_location(), Some(GeoPoint::new(0.1, 0.2)));
        assert_eq!(p.traffic_factor(), 1.5);
    }

    #[test]
    fn test_into_instance_lon_lat() {
        let p = request().into_instance(CoordinateOrder::LonLat).expect("valid");
        assert_eq!(p.deliveries()[0].location(), GeoPoint::new(0.02, 0.01));
    }

    #[test]
    fn test_missing_traffic_defaults_to_free_flow() {
        let r: OptimizationRequest =
            serde_json::from_str(r#"{ "vehicles": [{ "vehicleId": "v", "capacity": 1 }] }"#)
                .expect("valid");
        let p = r.into_instance(CoordinateOrder::default()).expect("valid");
        assert_eq!(p.traffic_factor(), 1.0);
        assert_eq!(p.num_deliveries(), 0);
    }

    #[test]
    fn test_rejects_no_vehicles() {
        let mut r = request();
        r.vehicles.clear();
        assert_eq!(
            r.into_instance(CoordinateOrder::LatLon).expect_err("empty fleet"),
            InputError::NoVehicles
        );
    }

    #[test]
    fn test_rejects_negative_capacity() {
        let mut r = request();
        r.vehicles[1].capacity = -3;
        assert_eq!(
            r.into_instance(CoordinateOrder::LatLon).expect_err("negative"),
            InputError::NegativeCapacity {
                vehicle: "v2".into()
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_vehicle() {
        let mut r = request();
        r.vehicles[1].vehicle_id = "v1".into();
        assert_eq!(
            r.into_instance(CoordinateOrder::LatLon).expect_err("duplicate"),
            InputError::DuplicateVehicleId("v1".into())
        );
    }

    #[test]
    fn test_rejects_malformed_location() {
        let mut r = request();
        r.deliveries[1].location.coordinates = vec![1.0];
        assert_eq!(
            r.into_instance(CoordinateOrder::LatLon).expect_err("malformed"),
            InputError::MalformedLocation {
                delivery: 1,
                len: 1
            }
        );
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut r = request();
        r.deliveries[0].location.coordinates = vec![f64::NAN, 0.0];
        assert_eq!(
            r.into_instance(CoordinateOrder::LatLon).expect_err("nan"),
            InputError::NonFiniteCoordinate { node: 1 }
        );
    }

    #[test]
    fn test_rejects_bad_traffic() {
        let mut r = request();
        r.traffic_data.multiplier = -0.5;
        assert_eq!(
            r.into_instance(CoordinateOrder::LatLon).expect_err("negative traffic"),
            InputError::InvalidTrafficFactor(-0.5)
        );
    }
}

#[cfg(all(test, feature = "json"))]
mod json_tests {
    use super::*;
    use crate::solver::SolverConfig;

    #[test]
    fn test_solve_json_round_trip() {
        let payload = r#"{
            "deliveries": [
                { "id": "a", "location": { "type": "Point", "coordinates": [0.01, 0.0] } },
                { "id": "b", "location": { "type": "Point", "coordinates": [0.0, 0.01] } }
            ],
            "vehicles": [{ "vehicleId": "v", "capacity": 2 }],
            "trafficData": { "multiplier": 1.0 }
        }"#;
        let out = solve_json(payload, CoordinateOrder::LatLon, &SolverConfig::default())
            .expect("solves");
        let value: serde_json::Value = serde_json::from_str(&out).expect("json output");
        assert_eq!(value["routes"][0]["vehicleId"], "v");
        assert_eq!(
            value["routes"][0]["deliverySequence"]
                .as_array()
                .map(Vec::len),
            Some(2)
        );
        assert!(value["totalDistance"].as_f64().is_some());
    }

    #[test]
    fn test_solve_json_uses_config() {
        use crate::local_search::CancelFlag;

        let payload = r#"{
            "deliveries": [
                { "id": "a", "location": { "coordinates": [0.01, 0.0] } },
                { "id": "b", "location": { "coordinates": [0.0, 0.01] } }
            ],
            "vehicles": [{ "vehicleId": "v", "capacity": 2 }]
        }"#;
        let flag = CancelFlag::new();
        flag.cancel();
        let config = SolverConfig::default().with_cancel_flag(flag);
        let cancelled = solve_json(payload, CoordinateOrder::LatLon, &config).expect("solves");
        let full = solve_json(payload, CoordinateOrder::LatLon, &SolverConfig::default())
            .expect("solves");
        // Construction alone is already optimal for two stops.
        assert_eq!(cancelled, full);
    }

    #[test]
    fn test_solve_json_infeasible() {
        let payload = r#"{
            "deliveries": [{ "id": "a", "location": { "coordinates": [0.01, 0.0] } }],
            "vehicles": [{ "vehicleId": "v", "capacity": 0 }]
        }"#;
        let err = solve_json(payload, CoordinateOrder::LatLon, &SolverConfig::default())
            .expect_err("infeasible");
        assert!(matches!(
            err,
            JsonSolveError::Solve(crate::error::SolveError::Infeasible(_))
        ));
    }

    #[test]
    fn test_solve_json_bad_payload() {
        let err = solve_json("{", CoordinateOrder::LatLon, &SolverConfig::default())
            .expect_err("bad json");
        assert!(matches!(err, JsonSolveError::Json(_)));
    }
}
