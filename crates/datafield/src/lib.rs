//! Pluggable field types for data activities.
//!
//! A data activity is a user-defined database: its owner configures fields,
//! participants add records, and everyone can browse and search them. This
//! crate implements the field side of that: each field type renders its edit
//! and search controls, turns a search term into a parameterized SQL filter,
//! decides whether a submitted value is empty and exports its configuration.
//!
//! The shipped field type is **long text**, a multi-line value with an
//! optional maximum length and live character counter.
//!
//! # Features
//!
//! - `sqlite` (default) - SQLite content store and rusqlite bindings for
//!   generated bind parameters
//!
//! # Architecture
//!
//! - [`fields`] - the [`DataField`] trait, field types and the type registry
//! - [`types`] - field definitions, identifiers and submitted values
//! - [`sql`] - SQL fragments, bind-name allocation and record filters
//! - [`render`] - HTML escaping, icons and declarative client behaviours
//! - [`storage`] - per-record content stores
//! - [`request`] - request parameter access and cleaning
//! - [`i18n`] - localized strings
//! - [`link`] - links to host pages
//! - [`config`] - configuration of the shipped collaborators
//! - [`error`] - error types
//!
//! Field types hold no host state. Everything they need is passed in through
//! [`FieldServices`], and the only mutable state while building a search
//! query is the caller's [`SqlBuildContext`](sql::SqlBuildContext).
//!
//! # Quick Start
//!
//! ```
//! use datafield::fields::{FieldServices, FieldTypeRegistry, build_search_filter};
//! use datafield::i18n::StringCatalog;
//! use datafield::link::WwwRootUrlBuilder;
//! use datafield::render::{HtmlOutput, PageRequirements};
//! use datafield::request::QueryParams;
//! use datafield::sql::{SqlBuildContext, SqlDialect};
//! use datafield::storage::MemoryContentStore;
//! use datafield::types::FieldDefinition;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = FieldTypeRegistry::with_builtin_types();
//! let fields = registry.instantiate_all([
//!     FieldDefinition::new(1, 1, "longtext", "Abstract").with_param(2, "500"),
//! ])?;
//!
//! // Render the edit form
//! let store = MemoryContentStore::new();
//! let output = HtmlOutput::new("https://example.org/pix");
//! let urls = WwwRootUrlBuilder::new("https://example.org")?;
//! let strings = StringCatalog::with_builtin_strings();
//! let services = FieldServices::new(&store, &output, &urls, &strings);
//!
//! let mut page = PageRequirements::new();
//! let html = fields[0]
//!     .display_add_field(&services, None, None)?
//!     .into_page(&mut page);
//! assert!(html.contains("0 of 500 characters"));
//! assert_eq!(page.calls().len(), 1);
//!
//! // Turn a search request into a filter
//! let request = QueryParams::from_query("f_1=rust");
//! let mut ctx = SqlBuildContext::new(SqlDialect::Sqlite);
//! let query = build_search_filter(&fields, &request, None, &mut ctx).build();
//! assert!(query.sql.contains(":df_text_1"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod fields;
pub mod i18n;
pub mod link;
pub mod render;
pub mod request;
pub mod sql;
pub mod storage;
pub mod types;

// Re-export commonly used types at crate root
pub use config::DataFieldConfig;
pub use error::{FieldError, FieldResult, StorageError, StorageResult};
pub use fields::{DataField, FieldServices, FieldTypeRegistry, LongTextField, SearchPriority};
pub use storage::ContentStore;
pub use types::{FieldDefinition, FieldId, FieldValue, FormData, RecordId};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
