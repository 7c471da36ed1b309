//! Vehicle type with a unit-count capacity.

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// A vehicle that leaves from and returns to the depot.
///
/// Capacity counts deliveries. A vehicle with capacity `<= 0` is kept in
/// the fleet (it still reports an empty route) but never receives work.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{GeoPoint, Vehicle};
///
/// let v = Vehicle::new("VAN-1", 10).with_current_location(GeoPoint::new(0.1, 0.1));
/// assert_eq!(v.id(), "VAN-1");
/// assert_eq!(v.capacity(), 10);
/// assert!(v.is_usable());
/// assert!(!Vehicle::new("VAN-2", 0).is_usable());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: String,
    capacity: i32,
    current_location: Option<GeoPoint>,
}

impl Vehicle {
    /// Creates a vehicle with the given identifier and capacity.
    pub fn new(id: impl Into<String>, capacity: i32) -> Self {
        Self {
            id: id.into(),
            capacity,
            current_location: None,
        }
    }

    /// Records where the vehicle currently is.
    ///
    /// Routing still anchors every vehicle at the depot.
    pub fn with_current_location(mut self, location: GeoPoint) -> Self {
        self.current_location = Some(location);
        self
    }

    /// Vehicle identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Maximum number of deliveries.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Last reported position, if any.
    pub fn current_location(&self) -> Option<GeoPoint> {
        self.current_location
    }

    /// Returns `true` if the vehicle can carry at least one delivery.
    pub fn is_usable(&self) -> bool {
        self.capacity > 0
    }

    /// Returns `true` if a route with `load` units can take `demand` more.
    pub fn fits(&self, load: i32, demand: i32) -> bool {
        self.is_usable() && load + demand <= self.capacity
    }
}
