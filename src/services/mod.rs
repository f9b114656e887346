// Service exports
pub mod catalog;
pub mod notifier;
pub mod provider;

pub use catalog::{Catalog, CatalogError};
pub use notifier::{ChannelNotifier, Notice, NoticeLevel, Notifier, TracingNotifier};
pub use provider::{
    RecommendationError, RecommendationProvider, RecommendationService, SimulatedProvider,
    DEFAULT_LATENCY, RECOMMENDATIONS_FAILED,
};
