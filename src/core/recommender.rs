use crate::models::{RecommendationQuery, ScoredServiceRecord, ScoringWeights, ServiceRecord};
use crate::core::{filters::filter_candidates, scoring::relevance_score};

/// Ranking orchestrator - filter, score, sort
///
/// # Pipeline Stages
/// 1. Category filter
/// 2. Distance filter (inclusive radius)
/// 3. Relevance scoring
/// 4. Stable descending sort by score
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    weights: ScoringWeights,
}

impl Recommender {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Rank the services near the query origin
    ///
    /// Equal scores keep their catalog order.
    ///
    /// # Arguments
    /// * `services` - The catalog, in catalog order
    /// * `query` - Origin, category filter and search radius
    ///
    /// # Returns
    /// Scored services, best match first
    pub fn rank(
        &self,
        services: &[ServiceRecord],
        query: &RecommendationQuery,
    ) -> Vec<ScoredServiceRecord> {
        let candidates = filter_candidates(
            services,
            query.category,
            &query.origin,
            query.max_distance_miles,
        );

        tracing::debug!(
            "{} of {} services within {} miles",
            candidates.len(),
            services.len(),
            query.max_distance_miles
        );

        let mut scored: Vec<ScoredServiceRecord> = candidates
            .into_iter()
            .map(|candidate| {
                let score = relevance_score(&candidate, &self.weights);
                tracing::trace!("Scored {} at {:.2}", candidate.service.id, score);

                ScoredServiceRecord {
                    service: candidate.service.clone(),
                    distance_miles: candidate.distance_miles,
                    score,
                }
            })
            .collect();

        // sort_by is stable, ties stay in catalog order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Availability, Category, GeoPoint, ServiceLocation};

    fn create_service(
        id: &str,
        category: Category,
        lat: f64,
        lng: f64,
        rating: Option<f64>,
        available: bool,
    ) -> ServiceRecord {
        ServiceRecord {
            id: id.to_string(),
            name: format!("Service {}", id),
            category,
            location: ServiceLocation {
                point: GeoPoint::new(lat, lng),
                address: None,
            },
            rating,
            availability: Some(Availability {
                available,
                slots: None,
                next_available: None,
            }),
        }
    }

    fn query() -> RecommendationQuery {
        RecommendationQuery::near(GeoPoint::new(40.7128, -74.0060))
    }

    #[test]
    fn test_rank_basic() {
        let recommender = Recommender::with_default_weights();

        let services = vec![
            create_service("1", Category::Dining, 40.72, -74.01, Some(4.0), true),
            create_service("2", Category::Dining, 45.0, -74.0, Some(5.0), true), // Too far
            create_service("3", Category::Sports, 40.72, -74.01, Some(4.0), true),
        ];

        let result = recommender.rank(&services, &query().with_category(Category::Dining));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].service.id, "1");
    }

    #[test]
    fn test_sorted_by_score() {
        let recommender = Recommender::with_default_weights();

        let services = vec![
            create_service("closed", Category::Dining, 40.7130, -74.0060, Some(5.0), false),
            create_service("open", Category::Dining, 40.7200, -74.0060, Some(3.0), true),
            create_service("unrated", Category::Dining, 40.7130, -74.0060, None, true),
        ];

        let result = recommender.rank(&services, &query());
        let ids: Vec<_> = result.iter().map(|s| s.service.id.as_str()).collect();

        // Unrated and near beats rated 3.0 further out; closed trails both
        assert_eq!(ids, vec!["unrated", "open", "closed"]);
        for pair in result.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let recommender = Recommender::with_default_weights();

        let services: Vec<_> = ["c", "a", "b"]
            .iter()
            .map(|id| create_service(id, Category::Education, 40.7200, -74.0060, Some(4.0), true))
            .collect();

        let result = recommender.rank(&services, &query());
        let ids: Vec<_> = result.iter().map(|s| s.service.id.as_str()).collect();

        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_nan_score_does_not_break_order() {
        let recommender = Recommender::with_default_weights();

        let services = vec![
            create_service("low", Category::Dining, 40.7200, -74.0060, Some(1.0), false),
            create_service("bad", Category::Dining, 40.7200, -74.0060, Some(f64::NAN), true),
            create_service("high", Category::Dining, 40.7200, -74.0060, Some(5.0), true),
        ];

        let result = recommender.rank(&services, &query());
        let valid: Vec<_> = result.iter().filter(|s| !s.score.is_nan()).collect();

        assert_eq!(result.len(), 3);
        assert_eq!(valid[0].service.id, "high");
        assert_eq!(valid[1].service.id, "low");
    }

    #[test]
    fn test_no_match_is_empty() {
        let recommender = Recommender::with_default_weights();
        let services = vec![create_service("1", Category::Dining, 40.72, -74.01, None, true)];

        let result = recommender.rank(&services, &query().with_category(Category::Hospitality));
        assert!(result.is_empty());
    }
}
