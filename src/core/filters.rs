use crate::models::{CategoryFilter, GeoPoint, ServiceRecord};
use super::distance::haversine_miles;

/// A service that passed category and distance filtering
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub service: &'a ServiceRecord,
    pub distance_miles: f64,
}

/// Check if a service passes the category filter
#[inline]
pub fn matches_category(service: &ServiceRecord, filter: CategoryFilter) -> bool {
    filter.matches(service.category)
}

/// Narrow the catalog to candidates within range
///
/// Stage 1 is the category test, stage 2 the distance test. The radius is
/// inclusive and survivors keep their catalog order. No match yields an empty
/// vector.
pub fn filter_candidates<'a>(
    services: &'a [ServiceRecord],
    filter: CategoryFilter,
    origin: &GeoPoint,
    max_distance_miles: f64,
) -> Vec<Candidate<'a>> {
    services
        .iter()
        .filter(|service| matches_category(service, filter))
        .map(|service| Candidate {
            service,
            distance_miles: haversine_miles(origin, &service.location.point),
        })
        .filter(|candidate| candidate.distance_miles <= max_distance_miles)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Availability, Category, ServiceLocation};

    fn create_service(id: &str, category: Category, lat: f64, lng: f64) -> ServiceRecord {
        ServiceRecord {
            id: id.to_string(),
            name: format!("Service {}", id),
            category,
            location: ServiceLocation {
                point: GeoPoint::new(lat, lng),
                address: None,
            },
            rating: Some(4.0),
            availability: Some(Availability::open(1)),
        }
    }

    fn origin() -> GeoPoint {
        GeoPoint::new(40.7128, -74.0060)
    }

    #[test]
    fn test_category_filter() {
        let services = vec![
            create_service("1", Category::Dining, 40.7130, -74.0060),
            create_service("2", Category::Sports, 40.7130, -74.0060),
            create_service("3", Category::Dining, 40.7140, -74.0060),
        ];

        let dining = filter_candidates(&services, Category::Dining.into(), &origin(), 5.0);
        let ids: Vec<_> = dining.iter().map(|c| c.service.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        let all = filter_candidates(&services, CategoryFilter::All, &origin(), 5.0);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_distance_filter_preserves_order() {
        let services = vec![
            create_service("far", Category::Dining, 41.5, -74.0),
            create_service("b", Category::Dining, 40.7200, -74.0060),
            create_service("a", Category::Dining, 40.7130, -74.0060),
        ];

        let candidates = filter_candidates(&services, CategoryFilter::All, &origin(), 5.0);
        let ids: Vec<_> = candidates.iter().map(|c| c.service.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(candidates[0].distance_miles > candidates[1].distance_miles);
    }

    #[test]
    fn test_radius_is_inclusive() {
        let services = vec![create_service("edge", Category::Education, 40.78, -74.0060)];
        let exact = haversine_miles(&origin(), &services[0].location.point);

        assert_eq!(filter_candidates(&services, CategoryFilter::All, &origin(), exact).len(), 1);
        assert!(filter_candidates(&services, CategoryFilter::All, &origin(), exact - 1e-9).is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let candidates = filter_candidates(&[], CategoryFilter::All, &origin(), 5.0);
        assert!(candidates.is_empty());
    }
}
