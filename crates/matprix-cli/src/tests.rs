use std::path::Path;

use clap::Parser;

use crate::{Cli, Commands};

#[test]
fn crawl_defaults_point_at_repo_paths() {
    let cli = Cli::parse_from(["matprix", "crawl"]);
    let Commands::Crawl { config, output } = cli.command else {
        panic!("expected crawl command");
    };
    assert_eq!(config, Path::new("config/scraper.yaml"));
    assert_eq!(output, Path::new("data/materials.json"));
}

#[test]
fn crawl_accepts_custom_paths() {
    let cli = Cli::parse_from([
        "matprix",
        "crawl",
        "--config",
        "/tmp/alt.yaml",
        "--output",
        "/tmp/out.json",
    ]);
    let Commands::Crawl { config, output } = cli.command else {
        panic!("expected crawl command");
    };
    assert_eq!(config, Path::new("/tmp/alt.yaml"));
    assert_eq!(output, Path::new("/tmp/out.json"));
}

#[test]
fn stats_defaults_to_the_snapshot_path() {
    let cli = Cli::parse_from(["matprix", "stats"]);
    let Commands::Stats { data } = cli.command else {
        panic!("expected stats command");
    };
    assert_eq!(data, Path::new("data/materials.json"));
}
