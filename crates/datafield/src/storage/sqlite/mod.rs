//! SQLite content store.
//!
//! Supports in-memory databases (tests, previews) and file databases. Search
//! filters built by field types run directly against the content table via
//! [`SqliteContentStore::search_records`].
//!
//! # Example
//!
//! ```
//! use datafield::storage::{ContentStore, SqliteContentStore};
//! use datafield::types::{FieldId, RecordId};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteContentStore::in_memory()?;
//! store.set_content(FieldId::new(1), RecordId::new(7), "Some long text")?;
//!
//! let content = store.get_content(FieldId::new(1), RecordId::new(7))?;
//! assert_eq!(content.as_deref(), Some("Some long text"));
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE data_content (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     fieldid INTEGER NOT NULL,
//!     recordid INTEGER NOT NULL,
//!     content TEXT,
//!     UNIQUE (fieldid, recordid)
//! );
//! ```

mod schema;
mod store;

pub use schema::SCHEMA_VERSION;
pub use store::{SqliteContentStore, SqliteStoreConfig};
