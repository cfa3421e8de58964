//! In-memory content store.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::StorageResult;
use crate::types::{FieldId, RecordId};

use super::ContentStore;

/// Content store backed by a map.
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    content: RwLock<HashMap<(FieldId, RecordId), String>>,
}

impl MemoryContentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.content.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.content.read().is_empty()
    }
}

impl ContentStore for MemoryContentStore {
    fn get_content(&self, field_id: FieldId, record_id: RecordId) -> StorageResult<Option<String>> {
        Ok(self.content.read().get(&(field_id, record_id)).cloned())
    }

    fn set_content(
        &self,
        field_id: FieldId,
        record_id: RecordId,
        content: &str,
    ) -> StorageResult<()> {
        self.content
            .write()
            .insert((field_id, record_id), content.to_string());
        Ok(())
    }

    fn delete_content(&self, field_id: FieldId, record_id: RecordId) -> StorageResult<bool> {
        Ok(self.content.write().remove(&(field_id, record_id)).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_delete() {
        let store = MemoryContentStore::new();
        let (field, record) = (FieldId::new(1), RecordId::new(10));

        assert_eq!(store.get_content(field, record).unwrap(), None);

        store.set_content(field, record, "first").unwrap();
        store.set_content(field, record, "second").unwrap();
        assert_eq!(store.get_content(field, record).unwrap().as_deref(), Some("second"));
        assert_eq!(store.len(), 1);

        assert!(store.delete_content(field, record).unwrap());
        assert!(!store.delete_content(field, record).unwrap());
        assert!(store.is_empty());
    }
}
