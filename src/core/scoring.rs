use crate::models::{ScoringWeights, ServiceRecord};
use super::filters::Candidate;

/// Calculate the relevance score for a candidate (0-100 with default weights)
///
/// Scoring formula:
/// score = (
///     max(0, 40 - miles * 8) +     # Closer = higher, zero from 5 miles on
///     rating / 5 * 30 +            # 15 when unrated
///     available ? 30 : 0           # Missing availability counts as unavailable
/// )
pub fn relevance_score(candidate: &Candidate<'_>, weights: &ScoringWeights) -> f64 {
    distance_score(candidate.distance_miles, weights)
        + rating_score(candidate.service.rating, weights)
        + availability_score(candidate.service, weights)
}

/// Distance component, decaying linearly to zero
#[inline]
pub fn distance_score(distance_miles: f64, weights: &ScoringWeights) -> f64 {
    (weights.distance_max - distance_miles * weights.distance_decay).max(0.0)
}

/// Rating component, neutral midpoint for unrated services
#[inline]
pub fn rating_score(rating: Option<f64>, weights: &ScoringWeights) -> f64 {
    match rating {
        Some(rating) => (rating / 5.0) * weights.rating_max,
        None => weights.neutral_rating,
    }
}

/// Availability component, all or nothing
#[inline]
pub fn availability_score(service: &ServiceRecord, weights: &ScoringWeights) -> f64 {
    if service.is_available() {
        weights.availability_bonus
    } else {
        0.0
    }
}
