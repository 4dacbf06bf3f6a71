//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the frontier database.

/// SQL schema for the database
///
/// Rows are read back in `rowid` order, which is the order they were
/// discovered in. The counters are seeded with `INSERT OR IGNORE` so reopening
/// a database never rewinds the crawl.
pub const SCHEMA_SQL: &str = r#"
-- Discovered player accounts
CREATE TABLE IF NOT EXISTS accounts (
    puuid TEXT PRIMARY KEY NOT NULL,
    game_name TEXT NOT NULL,
    tag_line TEXT NOT NULL
);

-- Discovered match ids
CREATE TABLE IF NOT EXISTS match_ids (
    match_id TEXT PRIMARY KEY NOT NULL
);

-- Crawl cursors
CREATE TABLE IF NOT EXISTS counters (
    name TEXT PRIMARY KEY NOT NULL,
    value INTEGER NOT NULL
);

INSERT OR IGNORE INTO counters (name, value) VALUES
    ('account_row', 0),
    ('match_id_row', 0);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
