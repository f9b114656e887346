use crate::core::Recommender;
use crate::models::{RecommendationQuery, ScoredServiceRecord};
use crate::services::catalog::Catalog;
use crate::services::notifier::{Notice, Notifier};
use async_trait::async_trait;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Message shown to the user when recommendations fail
pub const RECOMMENDATIONS_FAILED: &str = "Could not get service recommendations";

/// Default simulated round trip to the recommendation backend
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1000);

/// Errors a recommendation backend can report
#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("Recommendation backend unavailable: {0}")]
    Unavailable(String),
}

/// Source of ranked nearby services
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    async fn recommend(
        &self,
        query: &RecommendationQuery,
    ) -> Result<Vec<ScoredServiceRecord>, RecommendationError>;
}

/// Ranks an in-memory catalog after a fixed delay standing in for a network call
#[derive(Debug, Clone)]
pub struct SimulatedProvider {
    catalog: Arc<Catalog>,
    recommender: Recommender,
    latency: Duration,
}

impl SimulatedProvider {
    pub fn new(catalog: Arc<Catalog>, recommender: Recommender) -> Self {
        Self {
            catalog,
            recommender,
            latency: DEFAULT_LATENCY,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl RecommendationProvider for SimulatedProvider {
    async fn recommend(
        &self,
        query: &RecommendationQuery,
    ) -> Result<Vec<ScoredServiceRecord>, RecommendationError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        tracing::info!(
            "Finding {} services near [{}, {}]",
            query.category,
            query.origin.lat,
            query.origin.lng
        );

        Ok(self.recommender.rank(self.catalog.records(), query))
    }
}

/// Recommendation entry point for UI callers
///
/// Never fails: a provider error or panic is logged, reported through the
/// notifier and turned into an empty result. Dropping the returned future
/// cancels the query.
#[derive(Clone)]
pub struct RecommendationService {
    provider: Arc<dyn RecommendationProvider>,
    notifier: Arc<dyn Notifier>,
}

impl RecommendationService {
    pub fn new(provider: Arc<dyn RecommendationProvider>, notifier: Arc<dyn Notifier>) -> Self {
        Self { provider, notifier }
    }

    pub async fn recommend(&self, query: &RecommendationQuery) -> Vec<ScoredServiceRecord> {
        let outcome = AssertUnwindSafe(self.provider.recommend(query))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(services)) => services,
            Ok(Err(e)) => {
                tracing::error!("Error in recommendations: {}", e);
                self.notifier.notify(Notice::error(RECOMMENDATIONS_FAILED));
                vec![]
            }
            Err(_) => {
                tracing::error!("Recommendation provider panicked");
                self.notifier.notify(Notice::error(RECOMMENDATIONS_FAILED));
                vec![]
            }
        }
    }
}

impl std::fmt::Debug for RecommendationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use crate::services::notifier::ChannelNotifier;

    struct FailingProvider;

    #[async_trait]
    impl RecommendationProvider for FailingProvider {
        async fn recommend(
            &self,
            _query: &RecommendationQuery,
        ) -> Result<Vec<ScoredServiceRecord>, RecommendationError> {
            Err(RecommendationError::Unavailable("connection refused".to_string()))
        }
    }

    fn query() -> RecommendationQuery {
        RecommendationQuery::near(GeoPoint::new(40.7128, -74.0060))
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_latency() {
        let provider = SimulatedProvider::new(Arc::new(Catalog::reference()), Recommender::default());

        let started = tokio::time::Instant::now();
        let services = provider.recommend(&query()).await.unwrap();

        assert_eq!(services.len(), 6);
        assert!(started.elapsed() >= DEFAULT_LATENCY);
    }

    #[tokio::test]
    async fn test_error_degrades_to_empty() {
        let (notifier, mut notices) = ChannelNotifier::new(4);
        let service = RecommendationService::new(Arc::new(FailingProvider), Arc::new(notifier));

        let services = service.recommend(&query()).await;

        assert!(services.is_empty());
        assert_eq!(notices.try_recv().unwrap(), Notice::error(RECOMMENDATIONS_FAILED));
    }

    #[tokio::test]
    async fn test_success_sends_no_notice() {
        let (notifier, mut notices) = ChannelNotifier::new(4);
        let provider = SimulatedProvider::new(Arc::new(Catalog::reference()), Recommender::default())
            .with_latency(Duration::ZERO);
        let service = RecommendationService::new(Arc::new(provider), Arc::new(notifier));

        assert!(!service.recommend(&query()).await.is_empty());
        assert!(notices.try_recv().is_err());
    }
}
