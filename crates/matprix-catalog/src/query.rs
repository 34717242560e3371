//! Filtering and pagination over a catalog.
//!
//! Pure functions: the serving layer owns locking and serialization, this
//! module only decides which records a request sees.

use serde::{Deserialize, Serialize};

use matprix_core::Product;

use crate::store::Catalog;

/// Upper bound on the page size a caller may request.
pub const MAX_PER_PAGE: usize = 100;
pub const DEFAULT_PER_PAGE: usize = 20;

/// Conjunctive filter set: a record must satisfy every supplied predicate.
/// All text matching is case-insensitive; `category` is an exact match,
/// `supplier`/`brand`/`search` are substring matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    /// Free-text search against the product name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ProductFilters {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if !product.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(supplier) = &self.supplier {
            if !contains_ci(&product.supplier, supplier) {
                return false;
            }
        }
        if let Some(min_price) = self.min_price {
            if product.price < min_price {
                return false;
            }
        }
        if let Some(max_price) = self.max_price {
            if product.price > max_price {
                return false;
            }
        }
        if let Some(brand) = &self.brand {
            let found = product
                .brand
                .as_deref()
                .is_some_and(|b| contains_ci(b, brand));
            if !found {
                return false;
            }
        }
        if let Some(in_stock) = self.in_stock {
            if product.in_stock != in_stock {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !contains_ci(&product.name, search) {
                return false;
            }
        }
        true
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// One page of a filtered catalog view, with pagination metadata computed
/// over the full filtered set and the applied filters echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPage {
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub products: Vec<Product>,
    pub filters_applied: ProductFilters,
}

/// Filters the catalog and slices out one page.
///
/// `page` is 1-indexed (0 is treated as 1); `per_page` is clamped to
/// `1..=MAX_PER_PAGE`. `total` and `total_pages` always describe the
/// filtered set before slicing, so an out-of-range page returns an empty
/// product list with correct metadata — never an error.
#[must_use]
pub fn list_filtered(catalog: &Catalog, filters: &ProductFilters, page: usize, per_page: usize) -> ProductPage {
    let page = page.max(1);
    let per_page = per_page.clamp(1, MAX_PER_PAGE);

    let filtered: Vec<&Product> = catalog
        .products
        .iter()
        .filter(|p| filters.matches(p))
        .collect();

    let total = filtered.len();
    let total_pages = total.div_ceil(per_page);

    // Saturating arithmetic: `page` comes straight from the query string,
    // and an absurd value must produce an empty slice, not an overflow.
    let products: Vec<Product> = filtered
        .into_iter()
        .skip(page.saturating_sub(1).saturating_mul(per_page))
        .take(per_page)
        .cloned()
        .collect();

    ProductPage {
        total,
        page,
        per_page,
        total_pages,
        products,
        filters_applied: filters.clone(),
    }
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
