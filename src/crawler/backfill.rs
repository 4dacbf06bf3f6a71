//! Backfill pass for incomplete accounts
//!
//! Participants of older matches often come without a riot id. After the
//! crawl budget is spent, every account with an empty game name or tag line is
//! resolved again by puuid: found accounts are updated in place, accounts that
//! no longer exist are deleted.

use crate::api::RiotApi;
use crate::crawler::breaker::FailureBreaker;
use crate::crawler::progress::Progress;
use crate::crawler::retry::RetryPolicy;
use crate::storage::FrontierStore;
use crate::{Result, UnitKind};

/// Counters for one backfill pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackfillReport {
    pub updated: u64,
    pub deleted: u64,
    pub failed: u64,
}

/// Re-resolves every incomplete account
///
/// The set of accounts is taken once, when the pass starts. A failed lookup is
/// logged and the account left as is; the pass stops with
/// `ConsecutiveFailureLimit` once `breaker` trips.
pub async fn fill_missing_data<A, S>(
    api: &A,
    store: &mut S,
    retry: &RetryPolicy,
    mut breaker: FailureBreaker,
) -> Result<BackfillReport>
where
    A: RiotApi,
    S: FrontierStore,
{
    let incomplete = store.incomplete_accounts()?;
    tracing::info!("Filling {} accounts", incomplete.len());

    let mut progress = Progress::new(incomplete.len() as u64);
    let mut report = BackfillReport::default();

    for account in incomplete {
        let puuid = account.puuid.as_str();
        let resolved = retry
            .run(UnitKind::Backfill, puuid, move || api.account_by_puuid(puuid))
            .await;
        progress.increase();

        match resolved {
            Ok(Some(resolved)) => {
                store.update_account(&resolved)?;
                report.updated += 1;
                breaker.record_success();
            }
            Ok(None) => {
                tracing::warn!("Account '{}' not found, deleting it", puuid);
                store.delete_account(puuid)?;
                report.deleted += 1;
                breaker.record_success();
            }
            Err(e) => {
                tracing::error!("Skipping account '{}': {}", puuid, e);
                report.failed += 1;
                breaker.record_failure()?;
            }
        }
    }

    tracing::info!(
        "Backfill finished: {} updated, {} deleted, {} failed",
        report.updated,
        report.deleted,
        report.failed
    );
    Ok(report)
}
