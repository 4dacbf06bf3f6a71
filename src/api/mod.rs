//! Riot API access
//!
//! This module contains the fetch contract the crawler depends on:
//! - The `RiotApi` trait, whose `None` answers mean "not found upstream"
//! - Platform and regional routing values
//! - An HTTP implementation backed by `reqwest`

mod client;
mod region;

pub use client::{build_http_client, RiotClient};
pub use region::{Platform, RegionalRoute};

use crate::storage::Account;
use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by API calls other than "not found"
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Other(String),
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// A finished match, reduced to what the crawler needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchDetail {
    pub match_id: String,
    pub participants: Vec<Account>,
}

/// Fetch contract between the crawler and the game API
///
/// Every method answers `Ok(None)` when the resource does not exist upstream.
/// Any other failure is an `ApiError`, which callers run through the retry
/// policy.
#[async_trait]
pub trait RiotApi: Send + Sync {
    /// Resolves an account from its riot id (`game_name#tag_line`)
    async fn account_by_riot_id(&self, game_name: &str, tag_line: &str)
        -> ApiResult<Option<Account>>;

    /// Resolves an account from its puuid
    async fn account_by_puuid(&self, puuid: &str) -> ApiResult<Option<Account>>;

    /// Fetches the participants of a match
    async fn match_detail(&self, match_id: &str) -> ApiResult<Option<MatchDetail>>;

    /// Lists the most recent match ids of an account, newest first
    async fn recent_match_ids(&self, puuid: &str, start: u32, count: u32)
        -> ApiResult<Vec<String>>;
}
