mod materials;
mod rollups;

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use matprix_catalog::CatalogStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CatalogStore>,
}

#[derive(Debug, Serialize)]
struct ServiceBanner {
    message: &'static str,
    version: &'static str,
    total_products: usize,
    last_updated: DateTime<Utc>,
    endpoints: BTreeMap<&'static str, &'static str>,
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    timestamp: DateTime<Utc>,
    data_file: String,
    products_loaded: usize,
}

#[derive(Debug, Serialize)]
struct RefreshData {
    status: &'static str,
    products_loaded: usize,
    timestamp: DateTime<Utc>,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/materials", get(materials::list_materials))
        .route(
            "/materials/{category}",
            get(materials::list_materials_by_category),
        )
        .route("/categories", get(rollups::list_categories))
        .route("/suppliers", get(rollups::list_suppliers))
        .route("/stats", get(rollups::get_stats))
        .route("/health", get(health))
        .route("/refresh", post(refresh))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn root(State(state): State<AppState>) -> Json<ServiceBanner> {
    let catalog = state.store.catalog().await;
    Json(ServiceBanner {
        message: "Material Pricing API",
        version: env!("CARGO_PKG_VERSION"),
        total_products: catalog.len(),
        last_updated: catalog.scraped_at,
        endpoints: BTreeMap::from([
            ("materials", "/materials"),
            ("categories", "/categories"),
            ("suppliers", "/suppliers"),
            ("stats", "/stats"),
            ("health", "/health"),
        ]),
    })
}

async fn health(State(state): State<AppState>) -> Json<HealthData> {
    let catalog = state.store.catalog().await;
    Json(HealthData {
        status: "healthy",
        timestamp: Utc::now(),
        data_file: state.store.path().display().to_string(),
        products_loaded: catalog.len(),
    })
}

/// Re-reads the snapshot file and swaps it in for all readers.
async fn refresh(State(state): State<AppState>) -> Json<RefreshData> {
    let products_loaded = state.store.reload().await;
    tracing::info!(products = products_loaded, "catalog refreshed from disk");
    Json(RefreshData {
        status: "refreshed",
        products_loaded,
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
