use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Home-market currency used whenever the price text carries no recognizable
/// currency symbol, and for unparseable prices.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// A renovation material harvested from one supplier category page.
///
/// Immutable once constructed: `scraped_at` is stamped exactly once by
/// [`ExtractedFields::into_product`], and corrections are made by creating
/// a new record, never by mutating an existing one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Display name; always non-empty — extraction discards nameless records.
    pub name: String,
    /// Logical category key assigned by crawl configuration, not scraped.
    pub category: String,
    /// Non-negative price; `0.0` is the sentinel for "could not parse".
    pub price: f64,
    /// ISO-like 3-letter code, e.g. `"EUR"`.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Absolute URL to the product page, resolved against the supplier base.
    pub product_url: String,
    #[serde(default)]
    pub brand: Option<String>,
    /// Measurement unit token found in the product name, e.g. `"m²"`.
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub pack_size: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Defaults to `true` when the page carries no stock signal.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Supplier display name, set by the crawler.
    #[serde(default)]
    pub supplier: String,
    pub scraped_at: DateTime<Utc>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Returns `true` if the price was successfully parsed at extraction time.
    ///
    /// Records with the `0.0` sentinel are excluded from average/min/max
    /// statistics but still counted in totals.
    #[must_use]
    pub fn has_parsed_price(&self) -> bool {
        self.price > 0.0
    }
}

/// Field assembly produced by heuristic extraction, before the record is
/// finalized. Keeps [`Product`] itself immutable: the extractor fills this
/// struct field by field, then converts it exactly once.
#[derive(Debug, Clone)]
pub struct ExtractedFields {
    pub name: String,
    pub product_url: String,
    pub price: f64,
    pub currency: String,
    pub brand: Option<String>,
    pub unit: Option<String>,
    pub pack_size: Option<String>,
    pub image_url: Option<String>,
    pub in_stock: bool,
}

impl ExtractedFields {
    /// Finalizes the record, attaching the crawl-assigned `category` and
    /// `supplier` and stamping `scraped_at`.
    #[must_use]
    pub fn into_product(self, category: &str, supplier: &str) -> Product {
        Product {
            name: self.name,
            category: category.to_string(),
            price: self.price,
            currency: self.currency,
            product_url: self.product_url,
            brand: self.brand,
            unit: self.unit,
            pack_size: self.pack_size,
            image_url: self.image_url,
            in_stock: self.in_stock,
            supplier: supplier.to_string(),
            scraped_at: Utc::now(),
        }
    }
}
