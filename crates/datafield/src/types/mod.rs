//! Core types shared by every field type.
//!
//! - [`FieldDefinition`], [`FieldParams`] - configuration of one field instance
//! - [`FieldId`], [`RecordId`], [`DataId`] - identifiers
//! - [`FieldValue`], [`FormData`], [`SearchDefaults`] - submitted input
//!
//! # Example
//!
//! ```
//! use datafield::types::FieldDefinition;
//!
//! let field = FieldDefinition::new(12, 1, "longtext", "Abstract")
//!     .with_required(true)
//!     .with_param(2, "280");
//!
//! assert_eq!(field.input_name(), "field_12");
//! assert_eq!(field.max_length(), Some(280));
//! ```

mod definition;
mod ids;
mod values;

pub use definition::{FieldDefinition, FieldParams, PARAM_SLOTS, parse_int_prefix};
pub use ids::{DataId, FieldId, RecordId};
pub use values::{FieldValue, FormData, SearchDefaults};
