//! SQLite schema registry and destructive upgrade policy.
//!
//! # Responsibility
//! - Hold the current schema definition and its version.
//! - Recreate the store when the on-disk version does not match.
//!
//! # Invariants
//! - The applied version is mirrored to `PRAGMA user_version`.
//! - There is no migration path between versions: a mismatch (older, newer
//!   or negative) drops every user table and recreates the schema.
//! - A matching version with a `hymnbooks` column layout other than
//!   `EXPECTED_HYMNBOOKS_COLUMNS` is a mismatch too.
//! - Schema creation and recreation run in one transaction.

use crate::db::DbResult;
use log::warn;
use rusqlite::Connection;

/// Version written to `PRAGMA user_version` for the schema below.
pub const SCHEMA_VERSION: i64 = 1;

const SCHEMA_SQL: &str = include_str!("0001_hymnbooks.sql");

const EXPECTED_HYMNBOOKS_COLUMNS: &[&str] = &["type", "name", "language", "hymns"];

/// Outcome of bringing a connection's schema up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    /// The store was empty and the schema was created.
    Created,
    /// The store already carried the expected schema version and layout.
    Opened,
    /// The store carried another version or layout and was wiped and recreated.
    Recreated { from_version: i64 },
}

impl SchemaState {
    /// Returns whether the store holds no prior hymn data.
    pub fn is_fresh(self) -> bool {
        !matches!(self, Self::Opened)
    }
}

/// Returns the schema version known by this binary.
pub fn latest_version() -> i64 {
    SCHEMA_VERSION
}

/// Ensures the connection carries the current schema.
pub fn apply_schema(conn: &mut Connection) -> DbResult<SchemaState> {
    let current_version = current_user_version(conn)?;
    if current_version == SCHEMA_VERSION && hymnbooks_layout_matches(conn)? {
        return Ok(SchemaState::Opened);
    }

    let tables = user_tables(conn)?;
    let tx = conn.transaction()?;
    for table in &tables {
        tx.execute_batch(&format!("DROP TABLE IF EXISTS \"{}\";", table.replace('"', "\"\"")))?;
    }
    tx.execute_batch(SCHEMA_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    if current_version == 0 && tables.is_empty() {
        return Ok(SchemaState::Created);
    }

    warn!(
        "event=schema_recreate module=db status=ok from_version={} to_version={} dropped_tables={}",
        current_version,
        SCHEMA_VERSION,
        tables.len()
    );
    Ok(SchemaState::Recreated {
        from_version: current_version,
    })
}

/// Marks the store as unversioned so the next open recreates it.
pub(crate) fn reset_user_version(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA user_version = 0;")?;
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<i64> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, i64>(0))?;
    Ok(version)
}

fn hymnbooks_layout_matches(conn: &Connection) -> DbResult<bool> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('hymnbooks') ORDER BY cid;")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns == EXPECTED_HYMNBOOKS_COLUMNS)
}

fn user_tables(conn: &Connection) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
         ORDER BY name;",
    )?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}
