mod crawl;
mod stats;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "matprix")]
#[command(about = "Material pricing crawler and catalog tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl configured suppliers and write a catalog snapshot
    Crawl {
        /// Scrape configuration file
        #[arg(long, default_value = "config/scraper.yaml")]
        config: PathBuf,

        /// Where to write the snapshot
        #[arg(long, default_value = "data/materials.json")]
        output: PathBuf,
    },
    /// Summarize an existing catalog snapshot
    Stats {
        /// Snapshot to read
        #[arg(long, default_value = "data/materials.json")]
        data: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Crawl { config, output } => crawl::run(&config, &output).await,
        Commands::Stats { data } => {
            stats::run(&data);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
