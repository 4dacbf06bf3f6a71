//! Crawl engine - frontier selection and expansion
//!
//! The frontier is two append-only logs held by the store, each with a cursor:
//! match ids and accounts. Every call to `crawl_next` performs exactly one unit
//! of work with a fixed priority:
//! - Expand the next match while any known match is unexpanded
//! - Otherwise expand the next account, which discovers new matches
//! - Otherwise report that the frontier is exhausted
//!
//! Draining every match before admitting a new account gives an approximate
//! breadth-first walk of the account/match graph. Cursors are only advanced
//! and persisted once the unit fully succeeded, so a crash repeats at most the
//! unit in flight.

use crate::api::RiotApi;
use crate::config::{CrawlerConfig, SeedConfig};
use crate::crawler::backfill::{fill_missing_data, BackfillReport};
use crate::crawler::breaker::FailureBreaker;
use crate::crawler::progress::Progress;
use crate::crawler::retry::RetryPolicy;
use crate::storage::{Account, Counter, FrontierStore, BOT_PUUID};
use crate::{CrawlerError, Result, UnitKind};

/// Outcome of one `crawl_next` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlStep {
    /// A match was expanded into its participants
    Match(String),
    /// An account was expanded into its recent match ids
    Account(String),
    /// No unexpanded match or account remains
    Exhausted,
}

/// Counters for one `crawl_games` run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    pub attempted: u64,
    pub matches_expanded: u64,
    pub accounts_expanded: u64,
    pub failures: u64,
    pub exhausted: bool,
}

/// Main crawler structure
///
/// Cursors are read from the store once, at construction. From then on this
/// instance is the only writer, so two crawlers must never share a store.
pub struct Crawler<A: RiotApi, S: FrontierStore> {
    api: A,
    store: S,
    retry: RetryPolicy,
    failure_limit: u32,
    matches_per_account: u32,
    account_cursor: u64,
    match_cursor: u64,
}

impl<A: RiotApi, S: FrontierStore> Crawler<A, S> {
    /// Creates a crawler, bootstrapping an empty frontier from the seed account
    ///
    /// # Arguments
    ///
    /// * `api` - The API client
    /// * `store` - The frontier store
    /// * `seed` - Riot id resolved when the store holds no account yet
    /// * `settings` - Retry, breaker and paging settings
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(CrawlerError)` - The seed could not be resolved or the store failed
    pub async fn new(
        api: A,
        mut store: S,
        seed: &SeedConfig,
        settings: &CrawlerConfig,
    ) -> Result<Self> {
        let retry = RetryPolicy::new(settings.max_attempts);

        if store.accounts_count()? == 0 {
            let handle = format!("{}#{}", seed.game_name, seed.tag_line);
            tracing::info!("Frontier is empty, resolving seed account {}", handle);

            let api_ref = &api;
            let (game_name, tag_line) = (seed.game_name.as_str(), seed.tag_line.as_str());
            let account = retry
                .run(UnitKind::Seed, &handle, move || {
                    api_ref.account_by_riot_id(game_name, tag_line)
                })
                .await?
                .ok_or_else(|| CrawlerError::SeedNotFound {
                    game_name: seed.game_name.clone(),
                    tag_line: seed.tag_line.clone(),
                })?;

            store.insert_account_if_absent(&account)?;
            tracing::info!("Seeded frontier with account {}", account.puuid);
        }

        let account_cursor = store.cursor(Counter::AccountRow)?;
        let match_cursor = store.cursor(Counter::MatchIdRow)?;
        tracing::info!(
            "Resuming at account row {}, match row {}",
            account_cursor,
            match_cursor
        );

        Ok(Self {
            api,
            store,
            retry,
            failure_limit: settings.failure_limit,
            matches_per_account: settings.matches_per_account,
            account_cursor,
            match_cursor,
        })
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the crawler, handing back the API client and store
    pub fn into_parts(self) -> (A, S) {
        (self.api, self.store)
    }

    pub fn account_cursor(&self) -> u64 {
        self.account_cursor
    }

    pub fn match_cursor(&self) -> u64 {
        self.match_cursor
    }

    /// Performs exactly one unit of work
    ///
    /// Matches that no longer exist upstream are deleted and skipped without
    /// counting as a unit, so one call may prune several ids before it expands
    /// something.
    pub async fn crawl_next(&mut self) -> Result<CrawlStep> {
        loop {
            if let Some(match_id) = self.store.match_id_at_offset(self.match_cursor)? {
                if self.expand_match(&match_id).await? {
                    return Ok(CrawlStep::Match(match_id));
                }
                // The deletion moved the following id into this offset
                continue;
            }

            if let Some(account) = self.store.account_at_offset(self.account_cursor)? {
                self.expand_account(&account).await?;
                return Ok(CrawlStep::Account(account.puuid));
            }

            return Ok(CrawlStep::Exhausted);
        }
    }

    /// Stores every human participant of a match
    ///
    /// Returns `false` if the match was not found upstream and got pruned.
    async fn expand_match(&mut self, match_id: &str) -> Result<bool> {
        let api = &self.api;
        let detail = self
            .retry
            .run(UnitKind::Match, match_id, move || api.match_detail(match_id))
            .await?;

        let Some(detail) = detail else {
            tracing::warn!("Match '{}' not found, deleting it", match_id);
            self.store.delete_match_id(match_id)?;
            return Ok(false);
        };

        let mut discovered = 0;
        for participant in &detail.participants {
            if participant.puuid == BOT_PUUID {
                continue;
            }
            if self.store.insert_account_if_absent(participant)? {
                discovered += 1;
            }
        }

        self.match_cursor += 1;
        self.store.set_cursor(Counter::MatchIdRow, self.match_cursor)?;
        tracing::debug!(
            "Expanded match {} ({} new accounts)",
            match_id,
            discovered
        );
        Ok(true)
    }

    /// Stores the most recent match ids of an account
    async fn expand_account(&mut self, account: &Account) -> Result<()> {
        let api = &self.api;
        let puuid = account.puuid.as_str();
        let count = self.matches_per_account;
        let match_ids = self
            .retry
            .run(UnitKind::Account, puuid, move || {
                api.recent_match_ids(puuid, 0, count)
            })
            .await?;

        let discovered = self.store.insert_match_ids_if_absent(&match_ids)?;

        self.account_cursor += 1;
        self.store
            .set_cursor(Counter::AccountRow, self.account_cursor)?;
        tracing::debug!(
            "Expanded account {} ({} of {} match ids new)",
            puuid,
            discovered,
            match_ids.len()
        );
        Ok(())
    }

    /// Runs up to `total` units of work
    ///
    /// Failed units are logged and the loop moves on; the run only stops early
    /// when the frontier is exhausted or when too many units failed in a row,
    /// which is returned as the fatal `ConsecutiveFailureLimit` error.
    pub async fn crawl_games(&mut self, total: u64) -> Result<CrawlReport> {
        tracing::info!("Crawling {} games", total);

        let mut progress = Progress::new(total);
        let mut breaker = FailureBreaker::new(self.failure_limit);
        let mut report = CrawlReport::default();

        for unit in 1..=total {
            report.attempted += 1;
            match self.crawl_next().await {
                Ok(CrawlStep::Exhausted) => {
                    tracing::info!("Crawled all accounts and matches");
                    report.exhausted = true;
                    break;
                }
                Ok(step) => {
                    breaker.record_success();
                    match step {
                        CrawlStep::Match(_) => report.matches_expanded += 1,
                        CrawlStep::Account(_) => report.accounts_expanded += 1,
                        CrawlStep::Exhausted => {}
                    }
                }
                Err(e) => {
                    report.failures += 1;
                    tracing::error!(
                        "Unit {}/{} failed ({} in a row): {}",
                        unit,
                        total,
                        breaker.consecutive() + 1,
                        e
                    );
                    breaker.record_failure()?;
                }
            }
            progress.increase();
        }

        tracing::info!(
            "Crawl finished: {} matches and {} accounts expanded, {} failed units",
            report.matches_expanded,
            report.accounts_expanded,
            report.failures
        );
        Ok(report)
    }

    /// Re-resolves every account with an incomplete riot id
    pub async fn fill_missing_data(&mut self) -> Result<BackfillReport> {
        fill_missing_data(
            &self.api,
            &mut self.store,
            &self.retry,
            FailureBreaker::new(self.failure_limit),
        )
        .await
    }
}
