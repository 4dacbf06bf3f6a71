//! Storage traits and error types
//!
//! This module defines the trait interface for the frontier store and
//! associated error types.

use crate::storage::{Account, Counter};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Counter '{0}' is missing from the database")]
    MissingCounter(&'static str),

    #[error("Counter '{name}' holds an invalid value {value}")]
    InvalidCounter { name: &'static str, value: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for frontier store implementations
///
/// The store keeps two append-only logs (accounts and match ids) whose
/// insertion order is the crawl order, plus one cursor per log. Offsets passed
/// to the positional readers are zero-based positions in insertion order.
pub trait FrontierStore {
    // ===== Accounts =====

    /// Inserts an account unless one with the same puuid already exists
    ///
    /// # Returns
    ///
    /// `true` if a new row was written
    fn insert_account_if_absent(&mut self, account: &Account) -> StorageResult<bool>;

    /// Overwrites the riot id of an existing account
    fn update_account(&mut self, account: &Account) -> StorageResult<()>;

    /// Gets an account by puuid
    fn get_account(&self, puuid: &str) -> StorageResult<Option<Account>>;

    /// Gets the account at the given position, `None` once the log is exhausted
    fn account_at_offset(&self, offset: u64) -> StorageResult<Option<Account>>;

    /// Counts all stored accounts
    fn accounts_count(&self) -> StorageResult<u64>;

    /// Lists accounts with an empty game name or tag line
    fn incomplete_accounts(&self) -> StorageResult<Vec<Account>>;

    /// Deletes an account, returning whether it existed
    fn delete_account(&mut self, puuid: &str) -> StorageResult<bool>;

    // ===== Match ids =====

    /// Inserts every id not yet stored, in bounded transactional batches
    ///
    /// # Returns
    ///
    /// The number of ids that were new
    fn insert_match_ids_if_absent(&mut self, match_ids: &[String]) -> StorageResult<usize>;

    /// Gets the match id at the given position, `None` once the log is exhausted
    fn match_id_at_offset(&self, offset: u64) -> StorageResult<Option<String>>;

    /// Counts all stored match ids
    fn match_ids_count(&self) -> StorageResult<u64>;

    /// Deletes a match id, returning whether it existed
    fn delete_match_id(&mut self, match_id: &str) -> StorageResult<bool>;

    // ===== Cursors =====

    /// Reads a persisted cursor
    fn cursor(&self, counter: Counter) -> StorageResult<u64>;

    /// Persists a cursor value
    fn set_cursor(&mut self, counter: Counter, value: u64) -> StorageResult<()>;
}
