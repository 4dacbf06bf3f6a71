//! HTTP implementation of the Riot API contract
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the API key and user agent
//! - Routing account and match requests to the right regional cluster
//! - Mapping HTTP 404 to "not found" and other failures to `ApiError`

use crate::api::{ApiError, ApiResult, MatchDetail, Platform, RiotApi};
use crate::storage::Account;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Header carrying the API key
const API_KEY_HEADER: &str = "X-Riot-Token";

/// Builds an HTTP client that authenticates every request
///
/// # Arguments
///
/// * `api_key` - The Riot API key
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(ApiError)` - The key is not a valid header value or the client failed to build
pub fn build_http_client(api_key: &str) -> ApiResult<Client> {
    let mut key = HeaderValue::from_str(api_key)
        .map_err(|_| ApiError::Other("API key is not a valid header value".to_string()))?;
    key.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(API_KEY_HEADER, key);

    let user_agent = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

    let client = Client::builder()
        .user_agent(user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountDto {
    puuid: String,
    #[serde(default)]
    game_name: Option<String>,
    #[serde(default)]
    tag_line: Option<String>,
}

impl From<AccountDto> for Account {
    fn from(dto: AccountDto) -> Self {
        Account {
            puuid: dto.puuid,
            game_name: dto.game_name.unwrap_or_default(),
            tag_line: dto.tag_line.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchMetadataDto {
    #[serde(default)]
    match_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParticipantDto {
    puuid: String,
    #[serde(default)]
    riot_id_game_name: Option<String>,
    /// Older matches only carry this field
    #[serde(default)]
    riot_id_name: Option<String>,
    #[serde(default)]
    riot_id_tagline: Option<String>,
}

impl ParticipantDto {
    fn game_name(&mut self) -> String {
        match self.riot_id_game_name.take() {
            Some(name) if !name.is_empty() => name,
            _ => self.riot_id_name.take().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MatchInfoDto {
    #[serde(default)]
    participants: Vec<ParticipantDto>,
}

#[derive(Debug, Deserialize)]
struct MatchDto {
    #[serde(default)]
    metadata: MatchMetadataDto,
    info: MatchInfoDto,
}

impl From<MatchDto> for MatchDetail {
    fn from(dto: MatchDto) -> Self {
        MatchDetail {
            match_id: dto.metadata.match_id,
            participants: dto
                .info
                .participants
                .into_iter()
                .map(|mut p| Account {
                    game_name: p.game_name(),
                    puuid: p.puuid,
                    tag_line: p.riot_id_tagline.unwrap_or_default(),
                })
                .collect(),
        }
    }
}

/// Riot API client bound to one platform
pub struct RiotClient {
    client: Client,
    account_base: Url,
    match_base: Url,
}

impl RiotClient {
    /// Creates a client routed to the regional clusters of `platform`
    pub fn new(api_key: &str, platform: Platform) -> ApiResult<Self> {
        let region = platform.region();
        let account_base = Url::parse(&format!(
            "https://{}.api.riotgames.com/",
            region.account_route().host()
        ))?;
        let match_base = Url::parse(&format!("https://{}.api.riotgames.com/", region.host()))?;

        Ok(Self {
            client: build_http_client(api_key)?,
            account_base,
            match_base,
        })
    }

    /// Creates a client that sends every request to `base_url`
    ///
    /// Used for proxies and mock servers.
    pub fn with_base_url(api_key: &str, base_url: &str) -> ApiResult<Self> {
        let base = Url::parse(base_url)?;
        Ok(Self {
            client: build_http_client(api_key)?,
            account_base: base.clone(),
            match_base: base,
        })
    }

    fn endpoint(base: &Url, segments: &[&str]) -> ApiResult<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Other(format!("'{}' cannot be used as a base URL", base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a GET request, mapping 404 to `None`
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<Option<T>> {
        tracing::trace!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(Some(response.json::<T>().await?))
    }
}

#[async_trait]
impl RiotApi for RiotClient {
    async fn account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> ApiResult<Option<Account>> {
        let url = Self::endpoint(
            &self.account_base,
            &[
                "riot",
                "account",
                "v1",
                "accounts",
                "by-riot-id",
                game_name,
                tag_line,
            ],
        )?;
        let dto: Option<AccountDto> = self.get_json(url).await?;
        Ok(dto.map(Account::from))
    }

    async fn account_by_puuid(&self, puuid: &str) -> ApiResult<Option<Account>> {
        let url = Self::endpoint(
            &self.account_base,
            &["riot", "account", "v1", "accounts", "by-puuid", puuid],
        )?;
        let dto: Option<AccountDto> = self.get_json(url).await?;
        Ok(dto.map(Account::from))
    }

    async fn match_detail(&self, match_id: &str) -> ApiResult<Option<MatchDetail>> {
        let url = Self::endpoint(&self.match_base, &["lol", "match", "v5", "matches", match_id])?;
        let dto: Option<MatchDto> = self.get_json(url).await?;
        Ok(dto.map(MatchDetail::from))
    }

    async fn recent_match_ids(
        &self,
        puuid: &str,
        start: u32,
        count: u32,
    ) -> ApiResult<Vec<String>> {
        let mut url = Self::endpoint(
            &self.match_base,
            &["lol", "match", "v5", "matches", "by-puuid", puuid, "ids"],
        )?;
        url.query_pairs_mut()
            .append_pair("start", &start.to_string())
            .append_pair("count", &count.to_string());

        // An unknown puuid simply has no matches
        let ids: Option<Vec<String>> = self.get_json(url).await?;
        Ok(ids.unwrap_or_default())
    }
}
