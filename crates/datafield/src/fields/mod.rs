//! Field types.
//!
//! Every field type implements [`DataField`]: it renders its edit and
//! search controls, turns a search term into a SQL filter, decides whether a
//! submitted value is empty and exports its configuration. Types are looked
//! up by name through a [`FieldTypeRegistry`].
//!
//! # Example
//!
//! ```
//! use datafield::fields::{FieldServices, FieldTypeRegistry};
//! use datafield::i18n::StringCatalog;
//! use datafield::link::WwwRootUrlBuilder;
//! use datafield::render::HtmlOutput;
//! use datafield::storage::MemoryContentStore;
//! use datafield::types::FieldDefinition;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = FieldTypeRegistry::with_builtin_types();
//! let field = registry.instantiate(
//!     FieldDefinition::new(5, 1, "longtext", "Notes").with_param(2, "140"),
//! )?;
//!
//! let store = MemoryContentStore::new();
//! let output = HtmlOutput::new("https://example.org/pix");
//! let urls = WwwRootUrlBuilder::new("https://example.org")?;
//! let strings = StringCatalog::with_builtin_strings();
//! let services = FieldServices::new(&store, &output, &urls, &strings);
//!
//! let rendered = field.display_add_field(&services, None, None)?;
//! assert!(rendered.html.contains("maxlength=\"140\""));
//! assert_eq!(rendered.behaviors.len(), 1);
//! # Ok(())
//! # }
//! ```

mod longtext;
mod registry;
mod search;
mod services;

pub use longtext::LongTextField;
pub use registry::{FieldConstructor, FieldTypeRegistry};
pub use search::build_search_filter;
pub use services::FieldServices;

use std::collections::BTreeMap;

use crate::error::FieldResult;
use crate::render::{RenderedField, s};
use crate::request::RequestParams;
use crate::sql::{SqlBuildContext, SqlFragment};
use crate::storage::ContentStore;
use crate::types::{FieldDefinition, FieldValue, FormData, RecordId, SearchDefaults};

/// Indexing priority of a field type's content in global search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum SearchPriority {
    /// Content is indexed after everything else.
    #[default]
    Min,
    /// Content is indexed first.
    Max,
}

/// Behaviour shared by every field type.
pub trait DataField: Send + Sync {
    /// Type name, e.g. `"longtext"`.
    fn field_type(&self) -> &'static str;

    /// The definition this field was created from.
    fn definition(&self) -> &FieldDefinition;

    /// Global search indexing priority.
    fn search_priority(&self) -> SearchPriority {
        SearchPriority::Min
    }

    /// Renders the control used to add or edit a record's value.
    ///
    /// The value comes from `form_data` when given, else from the store for
    /// `record_id`, else it is empty.
    fn display_add_field(
        &self,
        services: &FieldServices<'_>,
        record_id: Option<RecordId>,
        form_data: Option<&FormData>,
    ) -> FieldResult<RenderedField>;

    /// Renders the type icon linking to the field's display page.
    fn image(&self, services: &FieldServices<'_>) -> String {
        let field = self.definition();
        let field_type = self.field_type();
        let url = services
            .urls
            .field_display_url(field.data_id, field.id, "display", services.sesskey);
        let icon = services.output.pix_icon(
            &format!("field/{}", field_type),
            field_type,
            &format!("datafield_{}", field_type),
        );
        format!("<a href=\"{}\">{}</a>", s(&url), icon)
    }

    /// Renders the search control pre-filled with `value`.
    fn display_search_field(&self, value: &str) -> String;

    /// Reads this field's search term from the request, falling back to
    /// `defaults`.
    fn parse_search_field(
        &self,
        request: &dyn RequestParams,
        defaults: Option<&SearchDefaults>,
    ) -> String;

    /// Builds the filter matching records whose value contains `value`.
    ///
    /// `table_alias` names the content table row the filter applies to and
    /// is written into the SQL as is; it must be a trusted identifier.
    fn generate_sql(
        &self,
        ctx: &mut SqlBuildContext,
        table_alias: &str,
        value: &str,
    ) -> SqlFragment;

    /// Returns true if a submitted value counts as empty.
    ///
    /// This is the host's `notemptyfield` check expressed as an emptiness
    /// predicate: it answers true for `""`. [`not_empty_field`](Self::not_empty_field)
    /// is its negation and is what the host's required-field check calls.
    fn is_empty_field(&self, value: &FieldValue, name: &str) -> bool;

    /// Returns true if a submitted value carries content.
    fn not_empty_field(&self, value: &FieldValue, name: &str) -> bool {
        !self.is_empty_field(value, name)
    }

    /// Configuration parameters for external API consumers.
    fn config_for_external(&self) -> BTreeMap<String, Option<String>> {
        self.definition()
            .params
            .iter()
            .map(|(name, value)| (name, value.map(str::to_string)))
            .collect()
    }

    /// Renders the stored value for browsing, or `None` when nothing is
    /// stored.
    fn display_browse_field(
        &self,
        services: &FieldServices<'_>,
        record_id: RecordId,
    ) -> FieldResult<Option<String>>;

    /// Stores a submitted value for `record_id`.
    fn update_content(
        &self,
        store: &dyn ContentStore,
        record_id: RecordId,
        value: &FieldValue,
    ) -> FieldResult<()> {
        let field = self.definition();
        tracing::debug!(field_id = %field.id, %record_id, "Updating field content");
        store.set_content(field.id, record_id, &value.to_form_text())?;
        Ok(())
    }

    /// Whether values of this type can be exported as text.
    fn text_export_supported(&self) -> bool {
        false
    }

    /// Text export of a stored value.
    fn export_text_value(&self, content: &str) -> String {
        content.to_string()
    }
}
