//! rift-crawler main entry point
//!
//! This is the command-line interface for the incremental match/account crawler.

use clap::Parser;
use rift_crawler::config::{load_config, Config};
use rift_crawler::crawler::crawl;
use rift_crawler::CrawlerError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// rift-crawler: an incremental match and account graph crawler
///
/// Each run expands up to TOTAL matches or accounts from the frontier stored
/// in the database, then completes accounts that are missing a riot id.
/// Interrupted runs resume from the last committed unit.
#[derive(Parser, Debug)]
#[command(name = "rift-crawler")]
#[command(version)]
#[command(about = "An incremental match and account crawler", long_about = None)]
struct Cli {
    /// Number of units (matches or accounts) to crawl in this run
    #[arg(value_name = "TOTAL", required_unless_present = "stats")]
    total: Option<u64>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "PATH", default_value = "crawler.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Skip completing incomplete accounts after the crawl
    #[arg(long)]
    skip_backfill: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "skip_backfill")]
    stats: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ CrawlerError::ConsecutiveFailureLimit { .. }) => {
            tracing::error!("Crawl aborted: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("Crawl stopped: {}", e);
            ExitCode::SUCCESS
        }
    }
}

async fn run(cli: Cli) -> Result<(), CrawlerError> {
    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)?;

    match cli.total {
        Some(total) if !cli.stats => handle_crawl(&config, total, !cli.skip_backfill).await,
        _ => handle_stats(&config),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("rift_crawler=info,warn"),
            1 => EnvFilter::new("rift_crawler=debug,info"),
            2 => EnvFilter::new("rift_crawler=trace,debug"),
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

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> Result<(), CrawlerError> {
    use rift_crawler::output::{load_statistics, print_statistics};
    use rift_crawler::storage::open_storage;
    use std::path::Path;

    println!("Database: {}\n", config.storage.database_path);

    let storage = open_storage(Path::new(&config.storage.database_path))?;
    let stats = load_statistics(&storage)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, total: u64, backfill: bool) -> Result<(), CrawlerError> {
    tracing::info!(
        "Crawling {} units on {} from seed {}#{}",
        total,
        config.riot_api.platform,
        config.seed.game_name,
        config.seed.tag_line
    );

    let report = crawl(config, total, backfill).await?;

    tracing::info!(
        "Crawl completed: {} matches and {} accounts expanded, {} failed units",
        report.crawl.matches_expanded,
        report.crawl.accounts_expanded,
        report.crawl.failures
    );
    if report.crawl.exhausted {
        tracing::warn!("Frontier exhausted before the budget was spent");
    }

    Ok(())
}
