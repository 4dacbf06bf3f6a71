//! Crawler module for frontier expansion
//!
//! This module contains the core crawling logic, including:
//! - Frontier selection and expansion of matches and accounts
//! - Bounded retry of API calls
//! - The consecutive failure breaker
//! - Progress output and the backfill pass

mod backfill;
mod breaker;
mod engine;
mod progress;
mod retry;

#[cfg(test)]
mod fake_api;

pub use backfill::{fill_missing_data, BackfillReport};
pub use breaker::{FailureBreaker, DEFAULT_FAILURE_LIMIT};
pub use engine::{CrawlReport, CrawlStep, Crawler};
pub use progress::Progress;
pub use retry::{RetryPolicy, DEFAULT_MAX_ATTEMPTS};

use crate::api::RiotClient;
use crate::config::Config;
use crate::storage::open_storage;
use crate::Result;
use std::path::Path;

/// Summary of a complete run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub crawl: CrawlReport,
    pub backfill: Option<BackfillReport>,
}

/// Runs a complete crawl operation
///
/// This is the main entry point for a run. It will:
/// 1. Open the frontier database
/// 2. Build the API client for the configured platform
/// 3. Seed the frontier if it is empty
/// 4. Crawl `total` units of work
/// 5. Backfill incomplete accounts, unless `backfill` is false
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `total` - Number of units to crawl
/// * `backfill` - Whether to run the backfill pass afterwards
///
/// # Returns
///
/// * `Ok(RunReport)` - Run completed
/// * `Err(CrawlerError)` - Startup failed or the failure breaker tripped
pub async fn crawl(config: &Config, total: u64, backfill: bool) -> Result<RunReport> {
    let platform = config.platform()?;
    let store = open_storage(Path::new(&config.storage.database_path))?;
    let api = RiotClient::new(&config.riot_api.key, platform)?;

    let mut crawler = Crawler::new(api, store, &config.seed, &config.crawler).await?;
    let crawl = crawler.crawl_games(total).await?;

    let backfill = if backfill {
        Some(crawler.fill_missing_data().await?)
    } else {
        None
    };

    Ok(RunReport { crawl, backfill })
}
