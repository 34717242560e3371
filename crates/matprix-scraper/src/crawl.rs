//! Sequential pagination for one (supplier, category) pair.
//!
//! Page N+1 is never requested before page N's extraction completes: the
//! page's content decides whether the next one is attempted at all, and
//! sequential paging keeps the per-host request rate predictable.

use scraper::Html;
use url::Url;

use matprix_core::Product;

use crate::extract::FieldExtractor;
use crate::fetch::PageFetcher;

/// Hard ceiling on pagination depth, independent of configuration.
/// Guarantees termination even against a site that keeps serving
/// plausible-looking pages.
pub const MAX_PAGES: u32 = 10;

/// One (supplier, category) unit of crawl work, built from configuration
/// and alive only for the duration of a single [`crawl_category`] run.
#[derive(Debug, Clone)]
pub struct CrawlTask {
    pub supplier_key: String,
    /// Display name stamped onto harvested records.
    pub supplier_name: String,
    pub base_url: String,
    pub category: String,
    pub category_path: String,
}

struct PageYield {
    containers: usize,
    products: Vec<Product>,
}

/// Crawls one category, page by page, until a stop condition is reached.
///
/// Stop conditions, first one wins:
/// 1. the collected count reaches `max_products`;
/// 2. a fetch fails (any non-2xx or transport error);
/// 3. a page has zero product containers;
/// 4. a page's containers yield zero extracted records (selector mismatch,
///    not a transient condition);
/// 5. the [`MAX_PAGES`] ceiling is reached.
///
/// Failures are local: the result is whatever was collected before the
/// stop, never an error. Output order is extraction order within pages.
pub async fn crawl_category(
    fetcher: &PageFetcher,
    extractor: &FieldExtractor,
    task: &CrawlTask,
    max_products: usize,
) -> Vec<Product> {
    let Ok(base_url) = Url::parse(&task.base_url) else {
        tracing::warn!(
            supplier = %task.supplier_key,
            base_url = %task.base_url,
            "invalid base URL, skipping category"
        );
        return Vec::new();
    };
    let Ok(category_url) = base_url.join(&task.category_path) else {
        tracing::warn!(
            supplier = %task.supplier_key,
            category = %task.category,
            path = %task.category_path,
            "invalid category path, skipping category"
        );
        return Vec::new();
    };

    tracing::info!(
        supplier = %task.supplier_name,
        category = %task.category,
        url = %category_url,
        "crawling category"
    );

    let mut products: Vec<Product> = Vec::new();
    let mut page: u32 = 1;

    while products.len() < max_products && page <= MAX_PAGES {
        let page_url = format!("{category_url}?page={page}");

        let body = match fetcher.fetch(&page_url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(
                    category = %task.category,
                    page,
                    error = %e,
                    "page fetch failed, ending category pagination"
                );
                break;
            }
        };

        let remaining = max_products - products.len();
        let yielded = extract_page(extractor, &body, &base_url, task, remaining);

        if yielded.containers == 0 {
            tracing::warn!(category = %task.category, page, "no product containers found");
            break;
        }

        let extracted = yielded.products.len();
        products.extend(yielded.products);

        if extracted == 0 {
            // Containers were found but none produced a record: the
            // selectors no longer match this markup, so further pages
            // would fail the same way.
            tracing::warn!(category = %task.category, page, "containers yielded no records");
            break;
        }

        page += 1;
    }

    tracing::info!(
        supplier = %task.supplier_name,
        category = %task.category,
        count = products.len(),
        "category crawl finished"
    );
    products
}

/// Parses one page body and extracts up to `remaining` records.
///
/// Synchronous on purpose: the parsed DOM is not `Send` and must not live
/// across a suspension point.
fn extract_page(
    extractor: &FieldExtractor,
    body: &str,
    base_url: &Url,
    task: &CrawlTask,
    remaining: usize,
) -> PageYield {
    let html = Html::parse_document(body);
    let containers = extractor.select_containers(&html);
    let container_count = containers.len();

    let products: Vec<Product> = containers
        .into_iter()
        .take(remaining)
        .filter_map(|container| extractor.extract(container, base_url))
        .map(|fields| fields.into_product(&task.category, &task.supplier_name))
        .collect();

    PageYield {
        containers: container_count,
        products,
    }
}

#[cfg(test)]
#[path = "crawl_test.rs"]
mod tests;
