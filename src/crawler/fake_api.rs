//! Scripted in-memory `RiotApi` used by the crawler unit tests

use crate::api::{ApiError, ApiResult, MatchDetail, RiotApi};
use crate::storage::Account;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeApi {
    accounts: HashMap<String, Account>,
    matches: HashMap<String, MatchDetail>,
    match_lists: HashMap<String, Vec<String>>,
    /// One entry per upcoming call, `true` failing it; empty means succeed
    failures: Mutex<VecDeque<bool>>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.accounts.insert(account.puuid.clone(), account);
        self
    }

    pub fn with_match(mut self, match_id: &str, participants: Vec<Account>) -> Self {
        self.matches.insert(
            match_id.to_string(),
            MatchDetail {
                match_id: match_id.to_string(),
                participants,
            },
        );
        self
    }

    pub fn with_match_list(mut self, puuid: &str, match_ids: &[&str]) -> Self {
        self.match_lists.insert(
            puuid.to_string(),
            match_ids.iter().map(|id| id.to_string()).collect(),
        );
        self
    }

    /// Queues call outcomes, `true` meaning the call fails
    pub fn script(&self, outcomes: &[bool]) {
        self.failures.lock().unwrap().extend(outcomes.iter().copied());
    }

    /// Queues `attempts` failing calls per unit, one unit per `true`, and one
    /// succeeding call per `false`
    pub fn script_units(&self, units: &[bool], attempts: u32) {
        for failed in units {
            if *failed {
                self.script(&vec![true; attempts as usize]);
            } else {
                self.script(&[false]);
            }
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call.clone());
        if self.failures.lock().unwrap().pop_front() == Some(true) {
            return Err(ApiError::Other(format!("scripted failure of {}", call)));
        }
        Ok(())
    }
}

#[async_trait]
impl RiotApi for FakeApi {
    async fn account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> ApiResult<Option<Account>> {
        self.record(format!("riot-id:{}#{}", game_name, tag_line))?;
        Ok(self
            .accounts
            .values()
            .find(|a| a.game_name == game_name && a.tag_line == tag_line)
            .cloned())
    }

    async fn account_by_puuid(&self, puuid: &str) -> ApiResult<Option<Account>> {
        self.record(format!("puuid:{}", puuid))?;
        Ok(self.accounts.get(puuid).cloned())
    }

    async fn match_detail(&self, match_id: &str) -> ApiResult<Option<MatchDetail>> {
        self.record(format!("match:{}", match_id))?;
        Ok(self.matches.get(match_id).cloned())
    }

    async fn recent_match_ids(
        &self,
        puuid: &str,
        start: u32,
        count: u32,
    ) -> ApiResult<Vec<String>> {
        self.record(format!("match-ids:{}", puuid))?;
        Ok(self
            .match_lists
            .get(puuid)
            .map(|ids| {
                ids.iter()
                    .skip(start as usize)
                    .take(count as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
