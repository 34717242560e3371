pub mod coordinator;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod price;

pub use coordinator::{build_tasks, run_crawl};
pub use crawl::{crawl_category, CrawlTask, MAX_PAGES};
pub use error::ScraperError;
pub use extract::FieldExtractor;
pub use fetch::PageFetcher;
pub use price::{extract_unit, parse_price};
