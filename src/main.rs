//! Price-Scout main entry point
//!
//! This is the command-line interface for the Price-Scout extractor.

use anyhow::Context;
use clap::Parser;
use price_scout::config::{load_config_with_hash, Config};
use price_scout::crawler::{build_page_url, run_scrape};
use price_scout::output::{print_statistics, save_to_csv, RunStatistics};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Price-Scout: product and price extraction from paginated search results
///
/// Walks the result pages of one search, extracts every item block described
/// by the configured selectors and appends the priced items to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "price-scout")]
#[command(version = "1.0.0")]
#[command(about = "Extracts product prices from paginated search results", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the pages that would be requested
    #[arg(long)]
    dry_run: bool,

    /// Write the CSV here instead of the configured output directory
    #[arg(short, long, value_name = "PATH", conflicts_with = "dry_run")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_scrape(config, cli.output, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("price_scout=info,warn"),
            1 => EnvFilter::new("price_scout=debug,info"),
            2 => EnvFilter::new("price_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be requested
fn handle_dry_run(config: &Config) {
    println!("=== Price-Scout Dry Run ===\n");

    println!("Search:");
    println!("  Query: {}", config.search.query);
    println!("  Pages: {}", config.search.pages);
    println!(
        "  Delay: {:.1}s - {:.1}s",
        config.search.delay_min, config.search.delay_max
    );
    println!("  On empty page: {:?}", config.search.on_empty_page);
    println!("  Timeout: {}ms", config.request.timeout_ms);

    println!("\nSelectors:");
    println!(
        "  container: <{}> {:?}",
        config.selectors.container.tag, config.selectors.container.attrs
    );
    for (field, spec) in &config.selectors.fields {
        println!("  {}: <{}> {:?}", field, spec.tag, spec.attrs);
    }

    println!("\nOutput:");
    println!(
        "  {}",
        config
            .output
            .csv_path(chrono::Local::now().date_naive())
            .display()
    );

    println!("\nPages:");
    for page in 1..=config.search.pages {
        println!(
            "  {}",
            build_page_url(&config.search.url_base, &config.search.query, page)
        );
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main scrape: run, persist, report
async fn handle_scrape(config: Config, output: Option<PathBuf>, quiet: bool) -> anyhow::Result<()> {
    let path = output.unwrap_or_else(|| config.output.csv_path(chrono::Local::now().date_naive()));

    let result = run_scrape(config).await.context("scrape setup failed")?;

    save_to_csv(&result.records, &path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    if !quiet {
        print_statistics(&RunStatistics::from_result(&result));
    }

    Ok(())
}
