//! Delivery stop type.

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// A geo-located delivery with unit demand.
///
/// `priority` is carried through for callers but does not influence
/// routing cost.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Delivery, GeoPoint};
///
/// let d = Delivery::new("D-1", GeoPoint::new(0.01, 0.0)).with_priority(3);
/// assert_eq!(d.id(), "D-1");
/// assert_eq!(d.demand(), 1);
/// assert_eq!(d.priority(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    id: String,
    location: GeoPoint,
    priority: i32,
}

impl Delivery {
    /// Every delivery occupies one unit of vehicle capacity.
    pub const DEMAND: i32 = 1;

    /// Creates a delivery with priority 0.
    pub fn new(id: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            location,
            priority: 0,
        }
    }

    /// Sets the (informational) priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// External identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Drop-off location.
    pub fn location(&self) -> GeoPoint {
        self.location
    }

    /// Informational priority.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Capacity units consumed by this delivery.
    pub fn demand(&self) -> i32 {
        Self::DEMAND
    }
}
