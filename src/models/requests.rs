use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{CategoryFilter, GeoPoint, RecommendationQuery};

/// Request to find nearby services
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    #[serde(default)]
    pub category: CategoryFilter,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(alias = "max_distance", rename = "maxDistance", default)]
    pub max_distance: Option<f64>,
}

impl RecommendRequest {
    /// Build the query, falling back to the configured search radius
    pub fn to_query(&self, default_max_distance: f64) -> RecommendationQuery {
        RecommendationQuery::near(GeoPoint::new(self.lat, self.lng))
            .with_category(self.category)
            .with_max_distance(self.max_distance.unwrap_or(default_max_distance))
    }
}
