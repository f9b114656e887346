use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{Category, ErrorResponse, HealthResponse, RecommendRequest, RecommendationsResponse};
use crate::services::{Catalog, RecommendationService};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub recommendations: RecommendationService,
    pub default_max_distance_miles: f64,
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/categories", web::get().to(list_categories))
        .route("/services/{id}", web::get().to(get_service))
        .route("/recommendations", web::post().to(recommend));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// GET /api/v1/categories
async fn list_categories() -> impl Responder {
    HttpResponse::Ok().json(Category::ALL)
}

/// GET /api/v1/services/{id}
async fn get_service(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.catalog.get(&id) {
        Some(service) => HttpResponse::Ok().json(service),
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "Service not found".to_string(),
            message: format!("No service with id {}", id),
            status_code: 404,
        }),
    }
}

/// Find nearby services endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "lat": 40.7128,
///   "lng": -74.0060,
///   "category": "all",
///   "maxDistance": 5
/// }
/// ```
///
/// A failing backend yields an empty list, never an error status.
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendation request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let query = req.to_query(state.default_max_distance_miles);
    let services = state.recommendations.recommend(&query).await;

    tracing::info!(
        "Returning {} {} services near [{}, {}]",
        services.len(),
        query.category,
        query.origin.lat,
        query.origin.lng
    );

    HttpResponse::Ok().json(RecommendationsResponse {
        total: services.len(),
        services,
    })
}
