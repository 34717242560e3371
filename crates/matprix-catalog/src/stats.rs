//! Rollup statistics by category, by supplier, and overall.
//!
//! Numeric semantics shared by every rollup: `product_count` counts all
//! records, while average/min/max are computed only over strictly positive
//! prices — the `0.0` unparseable sentinel would otherwise drag averages
//! toward zero and fabricate a free product as the minimum.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use matprix_core::Product;

use crate::store::Catalog;

#[derive(Debug, Clone, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryStats {
    pub name: String,
    pub product_count: usize,
    pub average_price: f64,
    pub price_range: PriceRange,
    /// Distinct suppliers carrying this category, in first-seen order.
    pub suppliers: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SupplierStats {
    pub name: String,
    pub product_count: usize,
    /// Distinct categories this supplier was crawled for, first-seen order.
    pub categories: Vec<String>,
    pub average_price: f64,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverallStats {
    pub total_products: usize,
    pub total_suppliers: usize,
    pub total_categories: usize,
    pub average_price: f64,
    pub price_range: PriceRange,
    pub last_updated: DateTime<Utc>,
}

/// Grouping accumulator keyed by a record field, preserving first-seen
/// order of both keys and counterpart values. Record order in the catalog
/// is crawl-completion order, so "first seen" is arbitrary but stable for
/// one snapshot — exactly what the tie-break rule needs.
struct Group<'a> {
    key: &'a str,
    members: Vec<&'a Product>,
    counterparts: Vec<&'a str>,
}

fn group_by<'a>(
    products: &'a [Product],
    key_of: fn(&Product) -> &str,
    counterpart_of: fn(&Product) -> &str,
) -> Vec<Group<'a>> {
    let mut groups: Vec<Group<'a>> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for product in products {
        let key = key_of(product);
        let i = *index.entry(key).or_insert_with(|| {
            groups.push(Group {
                key,
                members: Vec::new(),
                counterparts: Vec::new(),
            });
            groups.len() - 1
        });
        groups[i].members.push(product);
        let counterpart = counterpart_of(product);
        if !groups[i].counterparts.contains(&counterpart) {
            groups[i].counterparts.push(counterpart);
        }
    }

    // Stable sort: equal counts keep first-seen order.
    groups.sort_by(|a, b| b.members.len().cmp(&a.members.len()));
    groups
}

/// Average and min/max over strictly positive prices; all zeros when no
/// record has a parsed price.
fn price_summary<'a>(products: impl Iterator<Item = &'a Product>) -> (f64, PriceRange) {
    let prices: Vec<f64> = products
        .filter(|p| p.has_parsed_price())
        .map(|p| p.price)
        .collect();
    if prices.is_empty() {
        return (0.0, PriceRange { min: 0.0, max: 0.0 });
    }
    #[allow(clippy::cast_precision_loss)]
    let average = prices.iter().sum::<f64>() / prices.len() as f64;
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (average, PriceRange { min, max })
}

/// Per-category rollups, ordered by descending product count.
#[must_use]
pub fn category_stats(catalog: &Catalog) -> Vec<CategoryStats> {
    group_by(&catalog.products, |p| &p.category, |p| &p.supplier)
        .into_iter()
        .map(|group| {
            let (average_price, price_range) = price_summary(group.members.iter().copied());
            CategoryStats {
                name: group.key.to_string(),
                product_count: group.members.len(),
                average_price,
                price_range,
                suppliers: group.counterparts.iter().map(|s| (*s).to_string()).collect(),
            }
        })
        .collect()
}

/// Per-supplier rollups, ordered by descending product count.
#[must_use]
pub fn supplier_stats(catalog: &Catalog) -> Vec<SupplierStats> {
    group_by(&catalog.products, |p| &p.supplier, |p| &p.category)
        .into_iter()
        .map(|group| {
            let (average_price, _) = price_summary(group.members.iter().copied());
            SupplierStats {
                name: group.key.to_string(),
                product_count: group.members.len(),
                categories: group.counterparts.iter().map(|c| (*c).to_string()).collect(),
                average_price,
                last_updated: catalog.scraped_at,
            }
        })
        .collect()
}

/// Whole-catalog rollup. An empty catalog yields all-zero numeric stats
/// rather than an error.
#[must_use]
pub fn overall_stats(catalog: &Catalog) -> OverallStats {
    let (average_price, price_range) = price_summary(catalog.products.iter());

    let mut suppliers: Vec<&str> = Vec::new();
    let mut categories: Vec<&str> = Vec::new();
    for product in &catalog.products {
        if !suppliers.contains(&product.supplier.as_str()) {
            suppliers.push(&product.supplier);
        }
        if !categories.contains(&product.category.as_str()) {
            categories.push(&product.category);
        }
    }

    OverallStats {
        total_products: catalog.products.len(),
        total_suppliers: suppliers.len(),
        total_categories: categories.len(),
        average_price,
        price_range,
        last_updated: catalog.scraped_at,
    }
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod tests;
