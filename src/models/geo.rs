//! Geographic point type.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::GeoPoint;
///
/// let p = GeoPoint::new(48.85, 2.35);
/// assert_eq!(p.lat(), 48.85);
/// assert_eq!(p.lon(), 2.35);
/// assert!(p.is_finite());
/// assert_eq!(GeoPoint::ORIGIN, GeoPoint::new(0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// The point (0°, 0°), where the depot sits.
    pub const ORIGIN: GeoPoint = GeoPoint { lat: 0.0, lon: 0.0 };

    /// Creates a point from latitude and longitude in degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Returns `true` if both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_accessors() {
        let p = GeoPoint::new(-33.9, 151.2);
        assert_eq!(p.lat(), -33.9);
        assert_eq!(p.lon(), 151.2);
    }

    #[test]
    fn test_geo_point_non_finite() {
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_finite());
        assert!(!GeoPoint::new(0.0, f64::INFINITY).is_finite());
        assert!(GeoPoint::ORIGIN.is_finite());
    }
}
