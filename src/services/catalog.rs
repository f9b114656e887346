use crate::models::{Availability, Category, GeoPoint, ServiceLocation, ServiceRecord};
use chrono::{Duration, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while building or loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Duplicate service id: {0}")]
    DuplicateId(String),

    #[error("Invalid service {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),
}

/// TOML catalogs list records under `[[services]]`
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    services: Vec<ServiceRecord>,
}

/// Read-only, ordered collection of bookable services
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    services: Vec<ServiceRecord>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and non-finite numbers
    pub fn new(services: Vec<ServiceRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(services.len());
        for service in &services {
            if !seen.insert(service.id.as_str()) {
                return Err(CatalogError::DuplicateId(service.id.clone()));
            }
            check_finite(service)?;
        }

        Ok(Self { services })
    }

    /// Load a catalog from a `.json` or `.toml` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let services = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str::<Vec<ServiceRecord>>(&contents)?,
            Some("toml") => toml::from_str::<CatalogFile>(&contents)?.services,
            _ => return Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        };

        tracing::info!("Loaded {} services from {}", services.len(), path.display());

        Self::new(services)
    }

    /// The six-service Manhattan catalog used for demos and parity tests
    pub fn reference() -> Self {
        Self {
            services: vec![
                reference_service("svc1001", "City General Hospital", Category::Healthcare,
                    GeoPoint::new(40.7138, -74.0060), "123 Broadway, New York, NY 10010",
                    4.5, Availability::open(5)),
                reference_service("svc1002", "Downtown Sports Complex", Category::Sports,
                    GeoPoint::new(40.7238, -74.0090), "456 Park Ave, New York, NY 10012",
                    4.2, Availability::open(3)),
                reference_service("svc1003", "Grand Theater", Category::Entertainment,
                    GeoPoint::new(40.7318, -74.0120), "789 5th Ave, New York, NY 10013",
                    4.8, Availability::closed_until(Utc::now() + Duration::days(1))),
                reference_service("svc1004", "Riverfront Restaurant", Category::Dining,
                    GeoPoint::new(40.7158, -74.0160), "321 Water St, New York, NY 10014",
                    4.7, Availability::open(2)),
                reference_service("svc1005", "Central Hotel & Spa", Category::Hospitality,
                    GeoPoint::new(40.7278, -74.0030), "555 Main St, New York, NY 10015",
                    4.6, Availability::open(8)),
                reference_service("svc1006", "Metropolitan University", Category::Education,
                    GeoPoint::new(40.7348, -74.0050), "888 College Blvd, New York, NY 10016",
                    4.4, Availability::open(15)),
            ],
        }
    }

    pub fn records(&self) -> &[ServiceRecord] {
        &self.services
    }

    pub fn get(&self, id: &str) -> Option<&ServiceRecord> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Distinct categories present, in first-seen order
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = Vec::new();
        for service in &self.services {
            if !categories.contains(&service.category) {
                categories.push(service.category);
            }
        }
        categories
    }
}

/// NaN or infinite values would poison scoring
fn check_finite(service: &ServiceRecord) -> Result<(), CatalogError> {
    let invalid = |reason: &str| CatalogError::InvalidRecord {
        id: service.id.clone(),
        reason: reason.to_string(),
    };

    let point = &service.location.point;
    if !point.lat.is_finite() || !point.lng.is_finite() {
        return Err(invalid("coordinates must be finite"));
    }
    if service.rating.is_some_and(|rating| !rating.is_finite()) {
        return Err(invalid("rating must be finite"));
    }

    Ok(())
}

fn reference_service(
    id: &str,
    name: &str,
    category: Category,
    point: GeoPoint,
    address: &str,
    rating: f64,
    availability: Availability,
) -> ServiceRecord {
    ServiceRecord {
        id: id.to_string(),
        name: name.to_string(),
        category,
        location: ServiceLocation {
            point,
            address: Some(address.to_string()),
        },
        rating: Some(rating),
        availability: Some(availability),
    }
}
