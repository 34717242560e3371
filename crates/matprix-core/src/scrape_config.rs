use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// The only extraction strategy currently implemented. Suppliers declaring
/// any other strategy are skipped by the coordinator with a warning —
/// per-supplier adapters are an extension point, not an error condition.
pub const GENERIC_STRATEGY: &str = "generic";

/// One configured supplier: where its category pages live and which
/// extraction strategy applies to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierConfig {
    /// Display name attached to harvested records, e.g. `"Leroy Merlin"`.
    pub name: String,
    pub base_url: String,
    #[serde(default = "default_strategy")]
    pub strategy: String,
    /// category key → category path relative to `base_url`.
    pub categories: BTreeMap<String, String>,
}

fn default_strategy() -> String {
    GENERIC_STRATEGY.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapingParams {
    /// Lower bound of the politeness jitter before each page request.
    #[serde(default = "default_delay_min_ms")]
    pub delay_min_ms: u64,
    #[serde(default = "default_delay_max_ms")]
    pub delay_max_ms: u64,
    /// Per-category record cap for one crawl run.
    #[serde(default = "default_max_products")]
    pub max_products_per_category: usize,
    /// Global bound on category crawls fetching at once.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_requests: usize,
}

fn default_delay_min_ms() -> u64 {
    1000
}

fn default_delay_max_ms() -> u64 {
    3000
}

fn default_max_products() -> usize {
    50
}

fn default_max_concurrent() -> usize {
    3
}

impl Default for ScrapingParams {
    fn default() -> Self {
        Self {
            delay_min_ms: default_delay_min_ms(),
            delay_max_ms: default_delay_max_ms(),
            max_products_per_category: default_max_products(),
            max_concurrent_requests: default_max_concurrent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    pub suppliers: BTreeMap<String, SupplierConfig>,
    #[serde(default)]
    pub scraping: ScrapingParams,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        let mut categories = BTreeMap::new();
        categories.insert(
            "carrelage".to_string(),
            "/carrelage-parquet/carrelage-sol-mur".to_string(),
        );
        categories.insert(
            "lavabos".to_string(),
            "/salle-de-bains/lavabo-vasque".to_string(),
        );
        categories.insert("wc".to_string(), "/salle-de-bains/wc-toilettes".to_string());
        categories.insert(
            "peinture".to_string(),
            "/peinture-droguerie/peinture-interieur".to_string(),
        );
        categories.insert(
            "meuble-vasque".to_string(),
            "/salle-de-bains/meuble-de-salle-de-bains".to_string(),
        );
        categories.insert("douche".to_string(), "/salle-de-bains/douche".to_string());

        let mut suppliers = BTreeMap::new();
        suppliers.insert(
            "leroymerlin".to_string(),
            SupplierConfig {
                name: "Leroy Merlin".to_string(),
                base_url: "https://www.leroymerlin.fr".to_string(),
                strategy: GENERIC_STRATEGY.to_string(),
                categories,
            },
        );

        Self {
            suppliers,
            scraping: ScrapingParams::default(),
        }
    }
}

impl ScrapeConfig {
    /// Repairs configurations that would misbehave at crawl time: an inverted
    /// delay interval is swapped, and the concurrency bound is raised to 1.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.scraping.delay_min_ms > self.scraping.delay_max_ms {
            std::mem::swap(
                &mut self.scraping.delay_min_ms,
                &mut self.scraping.delay_max_ms,
            );
        }
        self.scraping.max_concurrent_requests = self.scraping.max_concurrent_requests.max(1);
        self
    }
}

/// Load the scrape configuration from a YAML file.
///
/// A missing or malformed file is never fatal: both fall back to the
/// built-in default covering one supplier and a fixed category set, so a
/// crawl run can always start.
#[must_use]
pub fn load_scrape_config(path: &Path) -> ScrapeConfig {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "scrape config not readable, using built-in default"
            );
            return ScrapeConfig::default();
        }
    };

    match serde_yaml::from_str::<ScrapeConfig>(&content) {
        Ok(config) => config.normalized(),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "scrape config failed to parse, using built-in default"
            );
            ScrapeConfig::default()
        }
    }
}
