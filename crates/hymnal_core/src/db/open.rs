//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Apply the schema policy before returning a usable connection.
//!
//! # Invariants
//! - Returned connections carry the current schema version.

use super::migrations::{apply_schema, SchemaState};
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a SQLite database file and brings its schema up to date.
///
/// # Side effects
/// - May drop and recreate every table when the stored version differs.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<(Connection, SchemaState)> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_open(conn, "file", started_at)
}

/// Opens an in-memory SQLite database with the current schema.
pub fn open_db_in_memory() -> DbResult<(Connection, SchemaState)> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=memory duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_open(conn, "memory", started_at)
}

fn finish_open(
    mut conn: Connection,
    mode: &str,
    started_at: Instant,
) -> DbResult<(Connection, SchemaState)> {
    match bootstrap_connection(&mut conn) {
        Ok(state) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={} schema={:?}",
                mode,
                started_at.elapsed().as_millis(),
                state
            );
            Ok((conn, state))
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<SchemaState> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_schema(conn)
}
