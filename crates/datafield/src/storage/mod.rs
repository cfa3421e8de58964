//! Content storage.
//!
//! A [`ContentStore`] holds the text saved for each (field, record) pair.
//! Field types read it to pre-fill edit forms and write it when a record is
//! saved. A missing value is `Ok(None)`, never an error.
//!
//! Backends:
//! - [`MemoryContentStore`] - in-process map, for tests and previews
//! - `SqliteContentStore` - SQLite via an r2d2 pool (feature `sqlite`)

mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::MemoryContentStore;
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteContentStore, SqliteStoreConfig};

use crate::error::StorageResult;
use crate::types::{FieldId, RecordId};

/// Storage of per-record field content.
pub trait ContentStore: Send + Sync {
    /// Returns the content stored for `(field_id, record_id)`.
    fn get_content(&self, field_id: FieldId, record_id: RecordId) -> StorageResult<Option<String>>;

    /// Stores `content` for `(field_id, record_id)`, replacing any previous value.
    fn set_content(&self, field_id: FieldId, record_id: RecordId, content: &str)
    -> StorageResult<()>;

    /// Removes the content of `(field_id, record_id)`. Returns whether a
    /// value existed.
    fn delete_content(&self, field_id: FieldId, record_id: RecordId) -> StorageResult<bool>;
}
