//! Great-circle distance computation
//!
//! Haversine formula on a spherical Earth. Accurate to within ~0.5% of
//! geodesic distance, which is sufficient for "within X km" queries that
//! do not involve road networks.

use super::point::Point;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometers.
///
/// Symmetric, zero for identical points, and non-negative for all valid
/// inputs.
pub fn haversine_km(a: Point, b: Point) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lon: f64) -> Point {
        Point::new(lat, lon).unwrap()
    }

    #[test]
    fn test_identity_is_zero() {
        let accra = pt(5.6037, -0.1870);
        assert_eq!(haversine_km(accra, accra), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            (pt(5.6037, -0.1870), pt(6.6885, -1.6244)),
            (pt(-33.9, 18.4), pt(51.5, -0.12)),
            (pt(0.0, 179.9), pt(0.0, -179.9)),
        ];
        for (a, b) in pairs {
            let ab = haversine_km(a, b);
            let ba = haversine_km(b, a);
            assert!((ab - ba).abs() < 1e-9, "asymmetric: {} vs {}", ab, ba);
        }
    }

    #[test]
    fn test_non_negative() {
        let a = pt(10.7856, -0.8514);
        let b = pt(4.8986, -1.7554);
        assert!(haversine_km(a, b) >= 0.0);
    }

    #[test]
    fn test_accra_to_kumasi_sanity_bound() {
        // Known ground truth: roughly 200 km apart
        let accra = pt(5.6037, -0.1870);
        let kumasi = pt(6.6885, -1.6244);
        let d = haversine_km(accra, kumasi);
        assert!(
            (190.0..=215.0).contains(&d),
            "Accra-Kumasi distance {} outside sanity bound",
            d
        );
    }

    #[test]
    fn test_antipodal_near_half_circumference() {
        let a = pt(0.0, 0.0);
        let b = pt(0.0, 180.0);
        let d = haversine_km(a, b);
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - half_circumference).abs() < 1.0);
    }
}
