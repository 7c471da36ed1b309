//! Domain model types for delivery dispatch.
//!
//! Geo points, deliveries with unit demand, capacity-limited vehicles,
//! routes as ordered node sequences, and the immutable problem instance
//! that ties everything together.

mod delivery;
mod geo;
mod problem;
mod route;
mod route_set;
mod solution;
mod vehicle;

pub use delivery::Delivery;
pub use geo::GeoPoint;
pub use problem::ProblemInstance;
pub use route::Route;
pub use route_set::RouteSet;
pub use solution::{OptimizationResult, RouteSummary};
pub use vehicle::Vehicle;
