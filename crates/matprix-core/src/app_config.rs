use std::net::SocketAddr;
use std::path::PathBuf;

/// Process-level configuration for the serving layer and crawl runner.
///
/// The scrape configuration itself (suppliers, categories, crawl limits)
/// lives in a YAML file pointed to by `config_path`; this struct only
/// carries what the process needs before that file is read.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Snapshot location read by the server and written by crawl runs.
    pub data_path: PathBuf,
    /// Location of the YAML scrape configuration.
    pub config_path: PathBuf,
    pub log_level: String,
}
