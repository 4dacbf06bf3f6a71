//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the FrontierStore trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{FrontierStore, StorageError, StorageResult};
use crate::storage::{Account, Counter};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// Number of match ids written per transaction
pub const MATCH_ID_BATCH_SIZE: usize = 500;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// Missing parent directories are created. Opening an existing database
    /// keeps its contents and cursors.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        puuid: row.get(0)?,
        game_name: row.get(1)?,
        tag_line: row.get(2)?,
    })
}

/// Offsets past `i64::MAX` can never match a row, so they clamp to the end
fn sql_offset(offset: u64) -> i64 {
    i64::try_from(offset).unwrap_or(i64::MAX)
}

impl FrontierStore for SqliteStorage {
    // ===== Accounts =====

    fn insert_account_if_absent(&mut self, account: &Account) -> StorageResult<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO accounts (puuid, game_name, tag_line) VALUES (?1, ?2, ?3)",
            params![account.puuid, account.game_name, account.tag_line],
        )?;
        Ok(inserted > 0)
    }

    fn update_account(&mut self, account: &Account) -> StorageResult<()> {
        self.conn.execute(
            "UPDATE accounts SET game_name = ?1, tag_line = ?2 WHERE puuid = ?3",
            params![account.game_name, account.tag_line, account.puuid],
        )?;
        Ok(())
    }

    fn get_account(&self, puuid: &str) -> StorageResult<Option<Account>> {
        let account = self
            .conn
            .query_row(
                "SELECT puuid, game_name, tag_line FROM accounts WHERE puuid = ?1",
                params![puuid],
                account_from_row,
            )
            .optional()?;
        Ok(account)
    }

    fn account_at_offset(&self, offset: u64) -> StorageResult<Option<Account>> {
        let account = self
            .conn
            .query_row(
                "SELECT puuid, game_name, tag_line FROM accounts ORDER BY rowid LIMIT 1 OFFSET ?1",
                params![sql_offset(offset)],
                account_from_row,
            )
            .optional()?;
        Ok(account)
    }

    fn accounts_count(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn incomplete_accounts(&self) -> StorageResult<Vec<Account>> {
        let mut stmt = self.conn.prepare(
            "SELECT puuid, game_name, tag_line FROM accounts
             WHERE game_name = '' OR tag_line = '' ORDER BY rowid",
        )?;

        let accounts = stmt
            .query_map([], account_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(accounts)
    }

    fn delete_account(&mut self, puuid: &str) -> StorageResult<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM accounts WHERE puuid = ?1", params![puuid])?;
        Ok(deleted > 0)
    }

    // ===== Match ids =====

    fn insert_match_ids_if_absent(&mut self, match_ids: &[String]) -> StorageResult<usize> {
        let mut inserted = 0;

        // One transaction per batch: a crash loses at most the batch in flight
        for batch in match_ids.chunks(MATCH_ID_BATCH_SIZE) {
            let tx = self.conn.transaction()?;
            {
                let mut stmt =
                    tx.prepare_cached("INSERT OR IGNORE INTO match_ids (match_id) VALUES (?1)")?;
                for match_id in batch {
                    inserted += stmt.execute(params![match_id])?;
                }
            }
            tx.commit()?;
        }

        Ok(inserted)
    }

    fn match_id_at_offset(&self, offset: u64) -> StorageResult<Option<String>> {
        let match_id = self
            .conn
            .query_row(
                "SELECT match_id FROM match_ids ORDER BY rowid LIMIT 1 OFFSET ?1",
                params![sql_offset(offset)],
                |row| row.get(0),
            )
            .optional()?;
        Ok(match_id)
    }

    fn match_ids_count(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM match_ids", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn delete_match_id(&mut self, match_id: &str) -> StorageResult<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM match_ids WHERE match_id = ?1", params![match_id])?;
        Ok(deleted > 0)
    }

    // ===== Cursors =====

    fn cursor(&self, counter: Counter) -> StorageResult<u64> {
        let name = counter.to_db_string();
        let value: i64 = self
            .conn
            .query_row(
                "SELECT value FROM counters WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(StorageError::MissingCounter(name))?;

        u64::try_from(value).map_err(|_| StorageError::InvalidCounter { name, value })
    }

    fn set_cursor(&mut self, counter: Counter, value: u64) -> StorageResult<()> {
        let name = counter.to_db_string();
        let value = i64::try_from(value).map_err(|_| StorageError::InvalidCounter {
            name,
            value: i64::MAX,
        })?;

        let updated = self.conn.execute(
            "UPDATE counters SET value = ?1 WHERE name = ?2",
            params![value, name],
        )?;
        if updated == 0 {
            return Err(StorageError::MissingCounter(name));
        }
        Ok(())
    }
}
