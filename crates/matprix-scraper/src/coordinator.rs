//! Fan-out of category crawls under a global concurrency bound.

use futures::stream::{self, StreamExt};

use matprix_core::{Product, ScrapeConfig, GENERIC_STRATEGY};

use crate::crawl::{crawl_category, CrawlTask};
use crate::error::ScraperError;
use crate::extract::FieldExtractor;
use crate::fetch::PageFetcher;

/// Builds one [`CrawlTask`] per configured category, across every supplier
/// whose extraction strategy is implemented.
///
/// Suppliers declaring an unimplemented strategy are logged and skipped —
/// a configuration extension point, not an error.
#[must_use]
pub fn build_tasks(config: &ScrapeConfig) -> Vec<CrawlTask> {
    let mut tasks = Vec::new();
    for (supplier_key, supplier) in &config.suppliers {
        if supplier.strategy != GENERIC_STRATEGY {
            tracing::warn!(
                supplier = %supplier_key,
                strategy = %supplier.strategy,
                "extraction strategy not implemented, skipping supplier"
            );
            continue;
        }
        for (category, path) in &supplier.categories {
            tasks.push(CrawlTask {
                supplier_key: supplier_key.clone(),
                supplier_name: supplier.name.clone(),
                base_url: supplier.base_url.clone(),
                category: category.clone(),
                category_path: path.clone(),
            });
        }
    }
    tasks
}

/// Runs a full crawl across all configured suppliers and categories.
///
/// At most `max_concurrent_requests` category crawls are in flight at
/// once; within each category pagination stays strictly sequential. A
/// category that stops early (fetch failure, empty page, selector
/// mismatch) never aborts its siblings. Results are concatenated in
/// completion order, which carries no meaning downstream.
///
/// # Errors
///
/// Returns [`ScraperError::Http`] only if the HTTP client itself cannot
/// be constructed; nothing that happens during crawling is fatal.
pub async fn run_crawl(config: &ScrapeConfig) -> Result<Vec<Product>, ScraperError> {
    let fetcher = PageFetcher::new(&config.scraping)?;
    let extractor = FieldExtractor::new();
    let tasks = build_tasks(config);
    let max_concurrent = config.scraping.max_concurrent_requests.max(1);
    let cap = config.scraping.max_products_per_category;

    tracing::info!(
        tasks = tasks.len(),
        max_concurrent,
        cap_per_category = cap,
        "starting crawl run"
    );

    let fetcher_ref = &fetcher;
    let extractor_ref = &extractor;
    let per_category: Vec<Vec<Product>> = stream::iter(&tasks)
        .map(|task| async move { crawl_category(fetcher_ref, extractor_ref, task, cap).await })
        .buffer_unordered(max_concurrent)
        .collect()
        .await;

    let products: Vec<Product> = per_category.into_iter().flatten().collect();
    tracing::info!(total = products.len(), "crawl run complete");
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use matprix_core::{ScrapingParams, SupplierConfig};
    use std::collections::BTreeMap;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_with_strategy(strategy: &str) -> ScrapeConfig {
        let mut categories = BTreeMap::new();
        categories.insert("peinture".to_string(), "/peinture".to_string());
        categories.insert("carrelage".to_string(), "/carrelage".to_string());

        let mut suppliers = BTreeMap::new();
        suppliers.insert(
            "bricodepot".to_string(),
            SupplierConfig {
                name: "Brico Dépôt".to_string(),
                base_url: "https://www.bricodepot.fr".to_string(),
                strategy: strategy.to_string(),
                categories,
            },
        );
        ScrapeConfig {
            suppliers,
            scraping: matprix_core::ScrapingParams::default(),
        }
    }

    #[test]
    fn builds_one_task_per_category() {
        let tasks = build_tasks(&config_with_strategy(GENERIC_STRATEGY));
        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|t| t.supplier_name == "Brico Dépôt"));
        assert!(tasks.iter().any(|t| t.category == "peinture"));
        assert!(tasks.iter().any(|t| t.category == "carrelage"));
    }

    #[test]
    fn skips_suppliers_with_unimplemented_strategy() {
        let tasks = build_tasks(&config_with_strategy("headless-browser"));
        assert!(tasks.is_empty());
    }

    #[test]
    fn default_config_yields_six_tasks() {
        let tasks = build_tasks(&ScrapeConfig::default());
        assert_eq!(tasks.len(), 6);
    }

    #[tokio::test]
    async fn failing_category_does_not_abort_its_siblings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/carrelage"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r##"<html><body><div class="product-card">
                    <h2 class="product-title"><a href="/p/carrelage-1.html">Carrelage gris</a></h2>
                    <span class="price">29,99 €</span>
                </div></body></html>"##,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/peinture"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let mut categories = BTreeMap::new();
        categories.insert("carrelage".to_string(), "/carrelage".to_string());
        categories.insert("peinture".to_string(), "/peinture".to_string());
        let mut suppliers = BTreeMap::new();
        suppliers.insert(
            "leroymerlin".to_string(),
            SupplierConfig {
                name: "Leroy Merlin".to_string(),
                base_url: server.uri(),
                strategy: GENERIC_STRATEGY.to_string(),
                categories,
            },
        );
        let config = ScrapeConfig {
            suppliers,
            scraping: ScrapingParams {
                delay_min_ms: 0,
                delay_max_ms: 0,
                max_products_per_category: 1,
                max_concurrent_requests: 2,
            },
        };

        let products = run_crawl(&config).await.expect("crawl run");
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].category, "carrelage");
        assert_eq!(products[0].supplier, "Leroy Merlin");
    }
}
