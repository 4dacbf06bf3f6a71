//! Statistics generation from the frontier database
//!
//! This module provides functionality for extracting and displaying
//! frontier statistics from the storage layer.

use crate::storage::{Counter, FrontierStore};
use crate::CrawlerError;

/// Frontier statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierStatistics {
    /// Total number of accounts discovered
    pub accounts: u64,

    /// Accounts still missing a game name or tag line
    pub incomplete_accounts: u64,

    /// Total number of match ids discovered
    pub match_ids: u64,

    /// Accounts already expanded
    pub account_cursor: u64,

    /// Match ids already expanded
    pub match_cursor: u64,

    /// Accounts waiting for expansion
    pub accounts_pending: u64,

    /// Match ids waiting for expansion
    pub matches_pending: u64,
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `storage` - The storage backend to query
///
/// # Returns
///
/// * `Ok(FrontierStatistics)` - Successfully loaded statistics
/// * `Err(CrawlerError)` - Failed to query statistics
pub fn load_statistics(storage: &dyn FrontierStore) -> Result<FrontierStatistics, CrawlerError> {
    let accounts = storage.accounts_count()?;
    let incomplete_accounts = storage.incomplete_accounts()?.len() as u64;
    let match_ids = storage.match_ids_count()?;
    let account_cursor = storage.cursor(Counter::AccountRow)?;
    let match_cursor = storage.cursor(Counter::MatchIdRow)?;

    // Backfill deletions can leave a cursor past the end of its log
    Ok(FrontierStatistics {
        accounts,
        incomplete_accounts,
        match_ids,
        account_cursor,
        match_cursor,
        accounts_pending: accounts.saturating_sub(account_cursor),
        matches_pending: match_ids.saturating_sub(match_cursor),
    })
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &FrontierStatistics) {
    println!("=== Frontier Statistics ===\n");

    println!("Accounts:");
    println!("  Discovered: {}", stats.accounts);
    println!("  Expanded: {}", stats.account_cursor);
    println!("  Pending: {}", stats.accounts_pending);
    println!("  Incomplete: {}", stats.incomplete_accounts);
    println!();

    println!("Matches:");
    println!("  Discovered: {}", stats.match_ids);
    println!("  Expanded: {}", stats.match_cursor);
    println!("  Pending: {}", stats.matches_pending);
    println!();

    let completeness = if stats.accounts > 0 {
        let complete = stats.accounts - stats.incomplete_accounts.min(stats.accounts);
        (complete as f64 / stats.accounts as f64) * 100.0
    } else {
        0.0
    };
    println!("Account completeness: {:.1}%", completeness);
}
