// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod recommender;
pub mod scoring;

pub use distance::{haversine_miles, EARTH_RADIUS_MILES};
pub use filters::{filter_candidates, matches_category, Candidate};
pub use recommender::Recommender;
pub use scoring::{availability_score, distance_score, rating_score, relevance_score};
