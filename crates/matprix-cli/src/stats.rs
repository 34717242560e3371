//! The `stats` command: human-readable rollup of a catalog snapshot.

use std::path::Path;

use matprix_catalog::{category_stats, overall_stats, Catalog};

pub fn run(data_path: &Path) {
    let catalog = Catalog::load(data_path);
    if catalog.is_empty() {
        println!("No products in {}", data_path.display());
        return;
    }
    print_summary(&catalog);
}

pub fn print_summary(catalog: &Catalog) {
    let overall = overall_stats(catalog);
    println!(
        "{} products across {} categories from {} suppliers (updated {})",
        overall.total_products,
        overall.total_categories,
        overall.total_suppliers,
        overall.last_updated.format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "Average price {:.2} EUR, range {:.2} - {:.2}",
        overall.average_price, overall.price_range.min, overall.price_range.max
    );

    for category in category_stats(catalog) {
        println!(
            "  {:<24} {:>4} products, avg {:.2} EUR",
            category.name, category.product_count, category.average_price
        );
    }
}
