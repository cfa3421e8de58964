//! SQLite content store.

use std::fmt::Debug;
use std::path::Path;
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, OptionalExtension, ToSql, params};
use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};
use crate::sql::{RecordFilter, SQLITE_LOWER_FN, SqlFragment};
use crate::storage::ContentStore;
use crate::types::{FieldId, RecordId};

use super::schema;

const BACKEND_NAME: &str = "sqlite";

/// Registers the scalar functions generated filters call.
///
/// `df_lower` lowercases with full Unicode case mapping; NULL stays NULL.
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        SQLITE_LOWER_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|v| v.to_lowercase()))
        },
    )
}

/// Content store backed by SQLite.
pub struct SqliteContentStore {
    pool: Pool<SqliteConnectionManager>,
    config: SqliteStoreConfig,
    is_memory: bool,
}

impl Debug for SqliteContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteContentStore")
            .field("config", &self.config)
            .field("is_memory", &self.is_memory)
            .finish_non_exhaustive()
    }
}

/// Configuration for the SQLite content store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqliteStoreConfig {
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection timeout in milliseconds.
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,

    /// SQLite busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u32,

    /// Enable WAL mode for file databases.
    #[serde(default = "default_true")]
    pub enable_wal: bool,
}

fn default_max_connections() -> u32 {
    4
}

fn default_connection_timeout_ms() -> u64 {
    30000
}

fn default_busy_timeout_ms() -> u32 {
    5000
}

fn default_true() -> bool {
    true
}

impl Default for SqliteStoreConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            connection_timeout_ms: default_connection_timeout_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
            enable_wal: true,
        }
    }
}

impl SqliteContentStore {
    /// Creates an in-memory store with an initialized schema.
    ///
    /// The pool holds a single connection since every in-memory connection
    /// is its own database.
    pub fn in_memory() -> StorageResult<Self> {
        let config = SqliteStoreConfig {
            max_connections: 1,
            ..Default::default()
        };
        let store = Self::build(SqliteConnectionManager::memory(), config, true)?;
        store.init_schema()?;
        Ok(store)
    }

    /// Opens or creates a file database with default configuration.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        Self::with_config(path, SqliteStoreConfig::default())
    }

    /// Opens or creates a file database.
    ///
    /// The schema is not created; call [`init_schema`](Self::init_schema).
    pub fn with_config<P: AsRef<Path>>(path: P, config: SqliteStoreConfig) -> StorageResult<Self> {
        tracing::info!(path = %path.as_ref().display(), "Opening SQLite content store");
        Self::build(SqliteConnectionManager::file(path.as_ref()), config, false)
    }

    fn build(
        manager: SqliteConnectionManager,
        config: SqliteStoreConfig,
        is_memory: bool,
    ) -> StorageResult<Self> {
        let busy_timeout = Duration::from_millis(u64::from(config.busy_timeout_ms));
        let manager = manager.with_init(move |conn| {
            conn.busy_timeout(busy_timeout)?;
            register_functions(conn)
        });

        let pool = Pool::builder()
            .max_size(config.max_connections.max(1))
            .connection_timeout(Duration::from_millis(config.connection_timeout_ms))
            .build(manager)
            .map_err(|e| StorageError::ConnectionFailed {
                backend_name: BACKEND_NAME.to_string(),
                message: e.to_string(),
            })?;

        let store = Self {
            pool,
            config,
            is_memory,
        };
        store.configure_connection()?;
        Ok(store)
    }

    /// Initialize the database schema.
    pub fn init_schema(&self) -> StorageResult<()> {
        let conn = self.get_connection()?;
        schema::initialize_schema(&conn)
    }

    /// Get a connection from the pool.
    fn get_connection(&self) -> StorageResult<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| StorageError::ConnectionFailed {
            backend_name: BACKEND_NAME.to_string(),
            message: e.to_string(),
        })
    }

    /// Switches file databases to WAL journaling.
    fn configure_connection(&self) -> StorageResult<()> {
        let conn = self.get_connection()?;

        if self.config.enable_wal && !self.is_memory {
            // journal_mode returns the resulting mode as a row
            conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))
                .map_err(|e| {
                    StorageError::query(BACKEND_NAME, format!("Failed to enable WAL mode: {}", e))
                })?;
        }

        Ok(())
    }

    /// Returns whether this is an in-memory database.
    pub fn is_memory(&self) -> bool {
        self.is_memory
    }

    /// Returns the store configuration.
    pub fn config(&self) -> &SqliteStoreConfig {
        &self.config
    }

    /// Returns the ids of the records matching `filter`, ascending.
    pub fn search_records(&self, filter: &RecordFilter) -> StorageResult<Vec<RecordId>> {
        let query = filter.build();
        self.query_record_ids(&query)
    }

    /// Runs a query selecting record ids in its first column.
    pub fn query_record_ids(&self, query: &SqlFragment) -> StorageResult<Vec<RecordId>> {
        let conn = self.get_connection()?;
        tracing::debug!(sql = %query.sql, params = query.params.len(), "Executing record query");

        let names: Vec<String> = query.params.keys().map(|name| format!(":{}", name)).collect();
        let bound: Vec<(&str, &dyn ToSql)> = names
            .iter()
            .zip(query.params.values())
            .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
            .collect();

        let mut stmt = conn
            .prepare(&query.sql)
            .map_err(|e| StorageError::query(BACKEND_NAME, e.to_string()))?;

        let rows = stmt
            .query_map(bound.as_slice(), |row| row.get::<_, i64>(0))
            .map_err(|e| StorageError::query(BACKEND_NAME, e.to_string()))?;

        rows.map(|row| {
            row.map(RecordId::new)
                .map_err(|e| StorageError::query(BACKEND_NAME, e.to_string()))
        })
        .collect()
    }
}

impl ContentStore for SqliteContentStore {
    fn get_content(&self, field_id: FieldId, record_id: RecordId) -> StorageResult<Option<String>> {
        let conn = self.get_connection()?;

        let content: Option<Option<String>> = conn
            .query_row(
                "SELECT content FROM data_content WHERE fieldid = ?1 AND recordid = ?2",
                params![field_id.get(), record_id.get()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StorageError::query(BACKEND_NAME, e.to_string()))?;

        if content.is_none() {
            tracing::debug!(%field_id, %record_id, "No stored content");
        }

        Ok(content.flatten())
    }

    fn set_content(
        &self,
        field_id: FieldId,
        record_id: RecordId,
        content: &str,
    ) -> StorageResult<()> {
        let conn = self.get_connection()?;

        conn.execute(
            "INSERT INTO data_content (fieldid, recordid, content) VALUES (?1, ?2, ?3)
             ON CONFLICT (fieldid, recordid) DO UPDATE SET content = excluded.content",
            params![field_id.get(), record_id.get(), content],
        )
        .map_err(|e| StorageError::query(BACKEND_NAME, e.to_string()))?;

        Ok(())
    }

    fn delete_content(&self, field_id: FieldId, record_id: RecordId) -> StorageResult<bool> {
        let conn = self.get_connection()?;

        let deleted = conn
            .execute(
                "DELETE FROM data_content WHERE fieldid = ?1 AND recordid = ?2",
                params![field_id.get(), record_id.get()],
            )
            .map_err(|e| StorageError::query(BACKEND_NAME, e.to_string()))?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::SqlParam;

    fn create_store() -> SqliteContentStore {
        SqliteContentStore::in_memory().expect("Failed to create SQLite store")
    }

    #[test]
    fn test_get_missing_content() {
        let store = create_store();
        assert_eq!(
            store.get_content(FieldId::new(1), RecordId::new(1)).unwrap(),
            None
        );
    }

    #[test]
    fn test_set_replaces_content() {
        let store = create_store();
        let (field, record) = (FieldId::new(2), RecordId::new(5));

        store.set_content(field, record, "draft").unwrap();
        store.set_content(field, record, "final").unwrap();

        assert_eq!(
            store.get_content(field, record).unwrap().as_deref(),
            Some("final")
        );
    }

    #[test]
    fn test_delete_content() {
        let store = create_store();
        let (field, record) = (FieldId::new(2), RecordId::new(5));
        store.set_content(field, record, "x").unwrap();

        assert!(store.delete_content(field, record).unwrap());
        assert!(!store.delete_content(field, record).unwrap());
    }

    #[test]
    fn test_query_record_ids_binds_named_params() {
        let store = create_store();
        store.set_content(FieldId::new(1), RecordId::new(1), "alpha").unwrap();
        store.set_content(FieldId::new(1), RecordId::new(2), "beta").unwrap();

        let query = SqlFragment::with_params(
            "SELECT recordid FROM data_content WHERE content = :wanted",
            [("wanted".to_string(), SqlParam::string("beta"))],
        );

        assert_eq!(store.query_record_ids(&query).unwrap(), vec![RecordId::new(2)]);
    }
}
