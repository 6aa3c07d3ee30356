//! Shared facility coordinate resolution
//!
//! The one cascade used by proximity search, coverage analysis, and the
//! exporter: persisted coordinate first, then gazetteer lookups by
//! city, address line, and region. Keeping a single implementation
//! prevents the fallback chains from drifting apart per operation.

use crate::gazetteer::Gazetteer;
use crate::geo::Point;
use crate::store::Facility;

/// Resolve a usable coordinate for a facility, or `None` if every
/// source fails. Callers drop unresolvable rows from their result set;
/// persisted state is never mutated here.
pub fn resolve_facility_point(facility: &Facility, gazetteer: &Gazetteer) -> Option<Point> {
    if let Some(point) = facility.coordinate {
        return Some(point);
    }

    [&facility.city, &facility.address_line1, &facility.region]
        .into_iter()
        .filter(|field| !field.trim().is_empty())
        .find_map(|field| gazetteer.lookup(field).map(|hit| hit.point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::GeocodeStatus;

    fn facility(city: &str, address: &str, region: &str, coordinate: Option<Point>) -> Facility {
        Facility {
            id: "f".into(),
            name: "Test Facility".into(),
            city: city.into(),
            region: region.into(),
            address_line1: address.into(),
            facility_type: String::new(),
            specialties: vec![],
            procedures: vec![],
            equipment: vec![],
            capabilities: vec![],
            description: String::new(),
            phone: String::new(),
            coordinate,
            geocode_status: GeocodeStatus::Unresolved,
        }
    }

    #[test]
    fn test_persisted_coordinate_wins() {
        let g = Gazetteer::new();
        let persisted = Point::new(7.0, -1.0).unwrap();
        let f = facility("Accra", "", "Northern", Some(persisted));
        assert_eq!(resolve_facility_point(&f, &g), Some(persisted));
    }

    #[test]
    fn test_city_beats_address_and_region() {
        let g = Gazetteer::new();
        let f = facility("Kumasi", "Tamale Road", "Northern", None);
        let p = resolve_facility_point(&f, &g).unwrap();
        assert!((p.lat - 6.6885).abs() < 1e-9);
    }

    #[test]
    fn test_address_fallback_when_city_unknown() {
        let g = Gazetteer::new();
        let f = facility("Nowhere Junction", "Osu Badu Street", "", None);
        // City fails; the address line fuzzy-matches the "osu" city key
        let p = resolve_facility_point(&f, &g).unwrap();
        assert!((p.lat - 5.55).abs() < 1e-9);
    }

    #[test]
    fn test_region_is_last_resort() {
        let g = Gazetteer::new();
        let f = facility("", "", "Upper West", None);
        let p = resolve_facility_point(&f, &g).unwrap();
        assert!((p.lat - 10.25).abs() < 1e-9);
    }

    #[test]
    fn test_nothing_resolves_is_none() {
        let g = Gazetteer::new();
        let f = facility("", "", "", None);
        assert_eq!(resolve_facility_point(&f, &g), None);

        let f = facility("Xanadu", "Shangri-La Blvd", "Oz", None);
        assert_eq!(resolve_facility_point(&f, &g), None);
    }
}
