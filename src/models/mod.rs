// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Availability, Category, CategoryFilter, CategoryParseError, GeoPoint, RecommendationQuery,
    ScoredServiceRecord, ScoringWeights, ServiceLocation, ServiceRecord, DEFAULT_MAX_DISTANCE_MILES,
};
pub use requests::RecommendRequest;
pub use responses::{ErrorResponse, HealthResponse, RecommendationsResponse};
