use crate::api::Platform;
use crate::crawler::{DEFAULT_FAILURE_LIMIT, DEFAULT_MAX_ATTEMPTS};
use crate::{ConfigError, ConfigResult};
use serde::Deserialize;

/// Default location of the frontier database
pub const DEFAULT_DATABASE_PATH: &str = "crawler.sqlite";

/// Largest page the match-ids endpoint serves
pub const MAX_MATCHES_PER_ACCOUNT: u32 = 100;

/// Main configuration structure for the crawler
///
/// Every section may be absent from the file; missing required values are
/// reported by validation rather than by the TOML parser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(rename = "riot-api", default)]
    pub riot_api: RiotApiConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
}

impl Config {
    /// Parses the configured platform
    pub fn platform(&self) -> ConfigResult<Platform> {
        self.riot_api
            .platform
            .parse()
            .map_err(|_| ConfigError::InvalidField {
                field: "riot-api.platform",
                value: self.riot_api.platform.clone(),
            })
    }
}

/// Riot API access
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RiotApiConfig {
    /// Developer or production API key
    #[serde(default)]
    pub key: String,

    /// Platform id such as "euw1", or its short name such as "euw"
    #[serde(default)]
    pub platform: String,
}

/// Account used to bootstrap an empty frontier
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedConfig {
    #[serde(rename = "game-name", default)]
    pub game_name: String,

    #[serde(rename = "tag-line", default)]
    pub tag_line: String,
}

/// Frontier database location
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Attempts per external fetch
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Consecutive failed units tolerated before the run aborts
    #[serde(rename = "failure-limit", default = "default_failure_limit")]
    pub failure_limit: u32,

    /// Recent match ids requested per account expansion
    #[serde(
        rename = "matches-per-account",
        default = "default_matches_per_account"
    )]
    pub matches_per_account: u32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            failure_limit: default_failure_limit(),
            matches_per_account: default_matches_per_account(),
        }
    }
}

fn default_database_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_failure_limit() -> u32 {
    DEFAULT_FAILURE_LIMIT
}

fn default_matches_per_account() -> u32 {
    MAX_MATCHES_PER_ACCOUNT
}
