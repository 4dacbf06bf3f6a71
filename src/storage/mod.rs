//! Storage module for persisting the crawl frontier
//!
//! This module handles all database operations for the crawler, including:
//! - SQLite database initialization and schema management
//! - The account and match id logs, which double as FIFO work queues
//! - The two persisted cursors that mark how far each queue was consumed

mod schema;
mod sqlite;
mod traits;

pub use sqlite::{SqliteStorage, MATCH_ID_BATCH_SIZE};
pub use traits::{FrontierStore, StorageError, StorageResult};

use crate::CrawlerError;

use std::path::Path;

/// Initializes or opens the frontier database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully initialized storage
/// * `Err(CrawlerError)` - Failed to initialize storage
pub fn open_storage(path: &Path) -> Result<SqliteStorage, CrawlerError> {
    Ok(SqliteStorage::new(path)?)
}

/// Puuid the match API reports for bot participants
pub const BOT_PUUID: &str = "BOT";

/// A discovered player account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
}

impl Account {
    pub fn new(
        puuid: impl Into<String>,
        game_name: impl Into<String>,
        tag_line: impl Into<String>,
    ) -> Self {
        Self {
            puuid: puuid.into(),
            game_name: game_name.into(),
            tag_line: tag_line.into(),
        }
    }

    /// Returns true if either half of the riot id is still unknown
    pub fn is_incomplete(&self) -> bool {
        self.game_name.is_empty() || self.tag_line.is_empty()
    }
}

/// Persisted crawl cursors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    /// Number of accounts whose match lists have been expanded
    AccountRow,
    /// Number of matches whose participants have been expanded
    MatchIdRow,
}

impl Counter {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::AccountRow => "account_row",
            Self::MatchIdRow => "match_id_row",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "account_row" => Some(Self::AccountRow),
            "match_id_row" => Some(Self::MatchIdRow),
            _ => None,
        }
    }
}
