//! Field type registry.
//!
//! Field types are registered explicitly under their type name. A
//! definition is turned into a field by the constructor registered for its
//! `field_type`.

use std::collections::HashMap;

use crate::error::{FieldError, FieldResult};
use crate::types::FieldDefinition;

use super::DataField;
use super::longtext::{LONGTEXT, LongTextField};

/// Creates a field from its definition.
pub type FieldConstructor = fn(FieldDefinition) -> Box<dyn DataField>;

/// Constructors of the available field types, keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct FieldTypeRegistry {
    constructors: HashMap<String, FieldConstructor>,
}

impl FieldTypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in field types.
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::new();
        registry
            .constructors
            .insert(LONGTEXT.to_string(), LongTextField::boxed);
        registry
    }

    /// Registers a field type.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::DuplicateFieldType`] if the name is taken.
    pub fn register(
        &mut self,
        field_type: impl Into<String>,
        constructor: FieldConstructor,
    ) -> FieldResult<()> {
        let field_type = field_type.into();
        if self.constructors.contains_key(&field_type) {
            tracing::warn!(field_type = %field_type, "Field type already registered");
            return Err(FieldError::DuplicateFieldType { field_type });
        }
        tracing::debug!(field_type = %field_type, "Registered field type");
        self.constructors.insert(field_type, constructor);
        Ok(())
    }

    /// Returns true if `field_type` is registered.
    pub fn contains(&self, field_type: &str) -> bool {
        self.constructors.contains_key(field_type)
    }

    /// Registered type names, sorted.
    pub fn field_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Returns true if no type is registered.
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Creates the field described by `definition`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::UnknownFieldType`] if no constructor is
    /// registered for the definition's type.
    pub fn instantiate(&self, definition: FieldDefinition) -> FieldResult<Box<dyn DataField>> {
        match self.constructors.get(&definition.field_type) {
            Some(constructor) => Ok(constructor(definition)),
            None => Err(FieldError::UnknownFieldType {
                field_type: definition.field_type,
            }),
        }
    }

    /// Creates the fields of all `definitions`, failing on the first
    /// unknown type.
    pub fn instantiate_all(
        &self,
        definitions: impl IntoIterator<Item = FieldDefinition>,
    ) -> FieldResult<Vec<Box<dyn DataField>>> {
        definitions
            .into_iter()
            .map(|definition| self.instantiate(definition))
            .collect()
    }
}
