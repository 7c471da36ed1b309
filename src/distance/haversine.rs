//! Great-circle distance.

use crate::models::GeoPoint;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometres (haversine).
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::haversine_km;
/// use u_dispatch::models::GeoPoint;
///
/// let d = haversine_km(GeoPoint::ORIGIN, GeoPoint::new(0.01, 0.0));
/// assert!((d - 1.112).abs() < 1e-3);
/// ```
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (b.lon() - a.lon()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance() {
        let p = GeoPoint::new(12.97, 77.59);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // 2πR / 360
        let d = haversine_km(GeoPoint::ORIGIN, GeoPoint::new(1.0, 0.0));
        assert!((d - 111.195).abs() < 1e-3);
    }

    #[test]
    fn test_symmetric() {
        let a = GeoPoint::new(48.8566, 2.3522);
        let b = GeoPoint::new(51.5074, -0.1278);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
        // Paris to London is roughly 344 km
        assert!((haversine_km(a, b) - 343.5).abs() < 1.0);
    }

    #[test]
    fn test_antipodal() {
        let d = haversine_km(GeoPoint::ORIGIN, GeoPoint::new(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }
}
