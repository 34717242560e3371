use super::*;
use crate::fetch::PageFetcher;
use matprix_core::ScrapingParams;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn instant_params() -> ScrapingParams {
    ScrapingParams {
        delay_min_ms: 0,
        delay_max_ms: 0,
        max_products_per_category: 50,
        max_concurrent_requests: 3,
    }
}

fn task_for(server: &MockServer) -> CrawlTask {
    CrawlTask {
        supplier_key: "leroymerlin".to_string(),
        supplier_name: "Leroy Merlin".to_string(),
        base_url: server.uri(),
        category: "carrelage".to_string(),
        category_path: "/carrelage".to_string(),
    }
}

/// A listing page with `count` well-formed product containers.
fn listing_page(count: usize) -> String {
    let mut body = String::from("<html><body>");
    for i in 0..count {
        body.push_str(&format!(
            r#"<div class="product-card">
                <h2 class="product-title"><a href="/p/carrelage-{i}.html">Carrelage modèle {i}</a></h2>
                <span class="price">1{i},99 €</span>
            </div>"#
        ));
    }
    body.push_str("</body></html>");
    body
}

/// A page whose containers are present but unextractable (no name, no link).
fn unextractable_page() -> String {
    r#"<html><body>
        <div class="product-card"><span class="price">10,00 €</span></div>
        <div class="product-card"><span class="price">20,00 €</span></div>
    </body></html>"#
        .to_string()
}

#[tokio::test]
async fn zero_container_page_stops_after_one_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/carrelage"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body><p>vide</p></body></html>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(&instant_params()).expect("fetcher");
    let products =
        crawl_category(&fetcher, &FieldExtractor::new(), &task_for(&server), 50).await;
    assert!(products.is_empty());
    // The .expect(1) on the mock verifies exactly one page was requested.
}

#[tokio::test]
async fn fetch_failure_ends_category_without_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(&instant_params()).expect("fetcher");
    let products =
        crawl_category(&fetcher, &FieldExtractor::new(), &task_for(&server), 50).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn cap_limits_records_within_a_single_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/carrelage"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(5)))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(&instant_params()).expect("fetcher");
    let products =
        crawl_category(&fetcher, &FieldExtractor::new(), &task_for(&server), 2).await;
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].category, "carrelage");
    assert_eq!(products[0].supplier, "Leroy Merlin");
}

#[tokio::test]
async fn paginates_until_an_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/carrelage"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(3)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/carrelage"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body></body></html>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(&instant_params()).expect("fetcher");
    let products =
        crawl_category(&fetcher, &FieldExtractor::new(), &task_for(&server), 50).await;
    assert_eq!(products.len(), 3);
}

#[tokio::test]
async fn containers_without_records_stop_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/carrelage"))
        .respond_with(ResponseTemplate::new(200).set_body_string(unextractable_page()))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(&instant_params()).expect("fetcher");
    let products =
        crawl_category(&fetcher, &FieldExtractor::new(), &task_for(&server), 50).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn page_ceiling_bounds_a_misbehaving_site() {
    let server = MockServer::start().await;
    // Every page looks full forever; only the ceiling can stop this crawl.
    Mock::given(method("GET"))
        .and(path("/carrelage"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(1)))
        .expect(u64::from(MAX_PAGES))
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(&instant_params()).expect("fetcher");
    let products =
        crawl_category(&fetcher, &FieldExtractor::new(), &task_for(&server), 1000).await;
    assert_eq!(products.len(), MAX_PAGES as usize);
}

#[tokio::test]
async fn invalid_base_url_yields_empty_result() {
    let fetcher = PageFetcher::new(&instant_params()).expect("fetcher");
    let task = CrawlTask {
        supplier_key: "broken".to_string(),
        supplier_name: "Broken".to_string(),
        base_url: "not a url".to_string(),
        category: "carrelage".to_string(),
        category_path: "/carrelage".to_string(),
    };
    let products = crawl_category(&fetcher, &FieldExtractor::new(), &task, 50).await;
    assert!(products.is_empty());
}
