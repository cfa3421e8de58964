//! SQLite schema definitions and migrations.

use rusqlite::Connection;

use crate::error::{StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
        tracing::info!(version = SCHEMA_VERSION, "Created content store schema");
    } else if current_version > SCHEMA_VERSION {
        return Err(StorageError::Schema {
            message: format!(
                "database schema version {} is newer than supported version {}",
                current_version, SCHEMA_VERSION
            ),
        });
    }

    Ok(())
}

/// Get the current schema version.
fn get_schema_version(conn: &Connection) -> StorageResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| StorageError::Schema {
        message: format!("Failed to create schema_version table: {}", e),
    })?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .ok();

    Ok(version.unwrap_or(0))
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> StorageResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| StorageError::Schema {
            message: format!("Failed to clear schema_version: {}", e),
        })?;

    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
        .map_err(|e| StorageError::Schema {
            message: format!("Failed to set schema_version: {}", e),
        })?;

    Ok(())
}

/// Create the initial schema (version 1).
fn create_schema_v1(conn: &Connection) -> StorageResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS data_content (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            fieldid INTEGER NOT NULL,
            recordid INTEGER NOT NULL,
            content TEXT,
            UNIQUE (fieldid, recordid)
        )",
        [],
    )
    .map_err(|e| StorageError::Schema {
        message: format!("Failed to create data_content table: {}", e),
    })?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_data_content_record ON data_content (recordid)",
        [],
    )
    .map_err(|e| StorageError::Schema {
        message: format!("Failed to create data_content index: {}", e),
    })?;

    Ok(())
}
