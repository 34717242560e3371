pub mod query;
pub mod stats;
pub mod store;

pub use query::{list_filtered, ProductFilters, ProductPage, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use stats::{category_stats, overall_stats, supplier_stats, CategoryStats, OverallStats, PriceRange, SupplierStats};
pub use store::{Catalog, CatalogError, CatalogStore};
