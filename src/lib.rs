//! Nearby Services - recommendation engine for the booking marketplace
//!
//! Finds bookable services near a point and ranks them by a weighted score of
//! distance, rating and availability. The service boundary never fails: errors
//! degrade to an empty result and a user-facing notice.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_miles, Recommender};
pub use models::{
    Category, CategoryFilter, GeoPoint, RecommendationQuery, ScoredServiceRecord, ScoringWeights,
    ServiceRecord,
};
pub use services::{
    Catalog, RecommendationProvider, RecommendationService, SimulatedProvider,
};
