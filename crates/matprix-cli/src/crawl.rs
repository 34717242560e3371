//! The `crawl` command: run every configured supplier/category pair and
//! persist the harvested records as one snapshot.

use std::path::Path;

use matprix_catalog::Catalog;

use crate::stats::print_summary;

pub async fn run(config_path: &Path, output_path: &Path) -> anyhow::Result<()> {
    let config = matprix_core::load_scrape_config(config_path).normalized();
    tracing::info!(
        suppliers = config.suppliers.len(),
        "starting crawl run"
    );

    let products = matprix_scraper::run_crawl(&config).await?;
    let catalog = Catalog::from_products(products);
    catalog.save(output_path)?;

    println!(
        "Crawl finished: {} products written to {}",
        catalog.len(),
        output_path.display()
    );
    print_summary(&catalog);
    Ok(())
}
