//! Rift Crawler: an incremental match-graph crawler
//!
//! This crate discovers player accounts and the matches they played through the
//! Riot Games API and persists both into SQLite. Crawling resumes across runs
//! from two persisted cursors, so known data is never fetched twice.

pub mod api;
pub mod config;
pub mod crawler;
pub mod output;
pub mod storage;

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Kind of unit an operation was working on, used in error and log context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Seed,
    Match,
    Account,
    Backfill,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Seed => "seed",
            Self::Match => "match",
            Self::Account => "account",
            Self::Backfill => "backfill",
        };
        f.write_str(name)
    }
}

/// Main error type for crawler operations
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Failed to build API client: {0}")]
    Client(#[from] api::ApiError),

    #[error("Seed account '{game_name}#{tag_line}' not found")]
    SeedNotFound { game_name: String, tag_line: String },

    #[error("{unit} '{id}' failed after {attempts} attempts: {source}")]
    RetryExhausted {
        unit: UnitKind,
        id: String,
        attempts: u32,
        source: api::ApiError,
    },

    #[error("{failures} errors in a row, stopping to prevent damage")]
    ConsecutiveFailureLimit { failures: u32 },
}

impl CrawlerError {
    /// Returns true if the process must stop on this error
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::SeedNotFound { .. } | Self::ConsecutiveFailureLimit { .. }
        )
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing field '{field}' in {}", .path.display())]
    MissingField { field: &'static str, path: PathBuf },

    #[error("Invalid value '{value}' for config field '{field}'")]
    InvalidField { field: &'static str, value: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for crawler operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use api::{Platform, RiotApi, RiotClient};
pub use config::Config;
pub use crawler::{CrawlStep, Crawler};
pub use storage::{Account, FrontierStore, SqliteStorage};
