mod app_config;
mod config;
mod products;
mod scrape_config;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{ExtractedFields, Product, DEFAULT_CURRENCY};
pub use scrape_config::{
    load_scrape_config, ScrapeConfig, ScrapingParams, SupplierConfig, GENERIC_STRATEGY,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
