//! Error types for field operations.
//!
//! Storage failures are kept separate from field-level errors so that a
//! content store can be reused outside of field rendering. A storage miss is
//! never an error: stores report it as `Ok(None)`.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for field operations.
#[derive(Error, Debug)]
pub enum FieldError {
    /// Content store errors, propagated untouched from the collaborator.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No constructor is registered for the requested field type.
    #[error("unknown field type: {field_type}")]
    UnknownFieldType { field_type: String },

    /// A constructor is already registered under this type name.
    #[error("field type already registered: {field_type}")]
    DuplicateFieldType { field_type: String },

    /// The field definition cannot be used.
    #[error("invalid field definition: {message}")]
    InvalidDefinition { message: String },
}

/// Errors raised by content stores.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Query execution error.
    #[error("query execution failed in {backend_name}: {message}")]
    Query {
        backend_name: String,
        message: String,
    },

    /// Schema creation or migration error.
    #[error("schema migration failed: {message}")]
    Schema { message: String },
}

impl StorageError {
    /// Creates a query error for the given backend.
    pub fn query(backend_name: &str, message: impl Into<String>) -> Self {
        StorageError::Query {
            backend_name: backend_name.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for field operations.
pub type FieldResult<T> = Result<T, FieldError>;

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
