use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use matprix_catalog::{list_filtered, ProductFilters, ProductPage, DEFAULT_PER_PAGE};

use super::AppState;

/// Query-string surface of the materials listing. Filter fields are spelled
/// out rather than flattened because form-urlencoded deserialization does
/// not see through `#[serde(flatten)]` for non-string values.
#[derive(Debug, Deserialize)]
pub(super) struct MaterialsQuery {
    page: Option<usize>,
    per_page: Option<usize>,
    category: Option<String>,
    supplier: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    brand: Option<String>,
    in_stock: Option<bool>,
    search: Option<String>,
}

impl MaterialsQuery {
    fn into_parts(self) -> (ProductFilters, usize, usize) {
        let filters = ProductFilters {
            category: self.category,
            supplier: self.supplier,
            min_price: self.min_price,
            max_price: self.max_price,
            brand: self.brand,
            in_stock: self.in_stock,
            search: self.search,
        };
        (
            filters,
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
    }
}

pub(super) async fn list_materials(
    State(state): State<AppState>,
    Query(query): Query<MaterialsQuery>,
) -> Json<ProductPage> {
    let (filters, page, per_page) = query.into_parts();
    let catalog = state.store.catalog().await;
    Json(list_filtered(&catalog, &filters, page, per_page))
}

#[derive(Debug, Deserialize)]
pub(super) struct CategoryPageQuery {
    page: Option<usize>,
    per_page: Option<usize>,
}

/// Path-parameter shorthand for `/materials?category=...`.
pub(super) async fn list_materials_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<CategoryPageQuery>,
) -> Json<ProductPage> {
    let filters = ProductFilters {
        category: Some(category),
        ..ProductFilters::default()
    };
    let catalog = state.store.catalog().await;
    Json(list_filtered(
        &catalog,
        &filters,
        query.page.unwrap_or(1),
        query.per_page.unwrap_or(DEFAULT_PER_PAGE),
    ))
}
