use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to another point in miles
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        crate::core::distance::haversine_miles(self, other)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown service category: {0}")]
pub struct CategoryParseError(pub String);

/// Kind of bookable service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Healthcare,
    Sports,
    Entertainment,
    Dining,
    Hospitality,
    Education,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Healthcare,
        Category::Sports,
        Category::Entertainment,
        Category::Dining,
        Category::Hospitality,
        Category::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Healthcare => "healthcare",
            Category::Sports => "sports",
            Category::Entertainment => "entertainment",
            Category::Dining => "dining",
            Category::Hospitality => "hospitality",
            Category::Education => "education",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// Category filter for a recommendation query
///
/// `All` only exists as a filter value. A service record always carries a
/// concrete [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    #[inline]
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = CategoryParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

/// Where a service is located. The address is for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLocation {
    #[serde(flatten)]
    pub point: GeoPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Booking availability of a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<u32>,
    /// Only meaningful when `available` is false
    #[serde(rename = "nextAvailable", default, skip_serializing_if = "Option::is_none")]
    pub next_available: Option<DateTime<Utc>>,
}

impl Availability {
    pub fn open(slots: u32) -> Self {
        Self {
            available: true,
            slots: Some(slots),
            next_available: None,
        }
    }

    pub fn closed_until(next_available: DateTime<Utc>) -> Self {
        Self {
            available: false,
            slots: None,
            next_available: Some(next_available),
        }
    }
}

/// A bookable service in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub location: ServiceLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
}

impl ServiceRecord {
    /// Missing availability data counts as unavailable
    pub fn is_available(&self) -> bool {
        self.availability.as_ref().is_some_and(|a| a.available)
    }
}

/// Ranked recommendation result, computed per query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredServiceRecord {
    #[serde(flatten)]
    pub service: ServiceRecord,
    #[serde(rename = "distanceMiles")]
    pub distance_miles: f64,
    pub score: f64,
}

/// Default search radius in miles
pub const DEFAULT_MAX_DISTANCE_MILES: f64 = 5.0;

/// Parameters of a nearby-service recommendation query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationQuery {
    pub origin: GeoPoint,
    pub category: CategoryFilter,
    pub max_distance_miles: f64,
}

impl RecommendationQuery {
    /// All categories within the default radius of `origin`
    pub fn near(origin: GeoPoint) -> Self {
        Self {
            origin,
            category: CategoryFilter::All,
            max_distance_miles: DEFAULT_MAX_DISTANCE_MILES,
        }
    }

    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_max_distance(mut self, max_distance_miles: f64) -> Self {
        self.max_distance_miles = max_distance_miles;
        self
    }
}

/// Relevance scoring weights
///
/// Each component is bounded independently:
/// - distance: `max(0, distance_max - miles * distance_decay)`
/// - rating: `rating / 5 * rating_max`, or `neutral_rating` when unrated
/// - availability: `availability_bonus` when available, else 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub distance_max: f64,
    pub distance_decay: f64,
    pub rating_max: f64,
    pub neutral_rating: f64,
    pub availability_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            distance_max: 40.0,
            distance_decay: 8.0,
            rating_max: 30.0,
            neutral_rating: 15.0,
            availability_bonus: 30.0,
        }
    }
}
