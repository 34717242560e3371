use axum::{extract::State, Json};

use matprix_catalog::{
    category_stats, overall_stats, supplier_stats, CategoryStats, OverallStats, SupplierStats,
};

use super::AppState;

pub(super) async fn list_categories(State(state): State<AppState>) -> Json<Vec<CategoryStats>> {
    let catalog = state.store.catalog().await;
    Json(category_stats(&catalog))
}

pub(super) async fn list_suppliers(State(state): State<AppState>) -> Json<Vec<SupplierStats>> {
    let catalog = state.store.catalog().await;
    Json(supplier_stats(&catalog))
}

pub(super) async fn get_stats(State(state): State<AppState>) -> Json<OverallStats> {
    let catalog = state.store.catalog().await;
    Json(overall_stats(&catalog))
}
