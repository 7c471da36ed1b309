//! # u-dispatch
//!
//! Capacitated delivery dispatch: assigns geo-located deliveries to a fleet
//! of vehicles that start and end at a shared depot, minimizing traffic-
//! scaled travel distance without exceeding any vehicle's capacity.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (GeoPoint, Delivery, Vehicle, Route, RouteSet, ProblemInstance)
//! - [`distance`] — Haversine distance and traffic-scaled integer cost matrix
//! - [`evaluation`] — Route cost and feasibility checking
//! - [`constructive`] — Nearest-feasible insertion construction
//! - [`local_search`] — 2-opt, relocation, and the budgeted search driver
//! - [`solver`] — Construct → improve → extract pipeline
//! - [`request`] — Wire request types and validation
//! - [`traffic`] — Time-of-day traffic multiplier estimation
//!
//! ## Example
//!
//! ```
//! use u_dispatch::models::{Delivery, GeoPoint, ProblemInstance, Vehicle};
//! use u_dispatch::solver::Solver;
//!
//! let instance = ProblemInstance::new(
//!     GeoPoint::ORIGIN,
//!     vec![
//!         Delivery::new("a", GeoPoint::new(0.01, 0.0)),
//!         Delivery::new("b", GeoPoint::new(0.0, 0.01)),
//!         Delivery::new("c", GeoPoint::new(-0.01, 0.0)),
//!     ],
//!     vec![Vehicle::new("van-1", 2), Vehicle::new("van-2", 2)],
//!     1.2,
//! )
//! .unwrap();
//!
//! let outcome = Solver::default().solve(&instance).unwrap();
//! assert_eq!(outcome.result.num_served(), 3);
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod request;
pub mod solver;
pub mod traffic;

pub use error::{InfeasibleError, InputError, SolveError};
