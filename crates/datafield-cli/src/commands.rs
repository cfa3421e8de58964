//! Subcommand implementations.
//!
//! Every command returns its output as a string; `main` prints it.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use datafield::DataFieldConfig;
use datafield::fields::{DataField, FieldServices, FieldTypeRegistry, build_search_filter};
use datafield::i18n::StringCatalog;
use datafield::link::WwwRootUrlBuilder;
use datafield::render::{HtmlOutput, PageRequirements};
use datafield::request::QueryParams;
use datafield::sql::RecordFilter;
use datafield::storage::SqliteContentStore;
use datafield::types::{FieldDefinition, FieldValue, FormData, RecordId, SearchDefaults};
use serde_json::json;
use tracing::{debug, info};

use crate::config::{CliConfig, SearchArgs};

/// Collaborators shared by all commands.
pub struct Runtime {
    config: DataFieldConfig,
    registry: FieldTypeRegistry,
    store: SqliteContentStore,
    output: HtmlOutput,
    urls: WwwRootUrlBuilder,
    strings: StringCatalog,
    sesskey: String,
}

impl Runtime {
    /// Opens the content store and sets up the collaborators.
    pub fn new(cli: &CliConfig) -> anyhow::Result<Self> {
        let config = cli.library_config();

        let store = if cli.is_memory_database() {
            SqliteContentStore::in_memory()?
        } else {
            info!(database = %cli.database, "Opening content database");
            let store = SqliteContentStore::with_config(&cli.database, config.sqlite.clone())?;
            store.init_schema()?;
            store
        };

        Ok(Self {
            output: config.output(),
            urls: config
                .url_builder()
                .with_context(|| format!("Invalid wwwroot '{}'", config.wwwroot))?,
            registry: FieldTypeRegistry::with_builtin_types(),
            strings: StringCatalog::with_builtin_strings(),
            sesskey: cli.sesskey.clone(),
            config,
            store,
        })
    }

    fn services(&self) -> FieldServices<'_> {
        FieldServices::new(&self.store, &self.output, &self.urls, &self.strings)
            .with_sesskey(&self.sesskey)
    }

    /// Reads and instantiates the field definitions in `path`.
    pub fn load_fields(&self, path: &Path) -> anyhow::Result<Vec<Box<dyn DataField>>> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read field definitions from {}", path.display()))?;
        let definitions = FieldDefinition::list_from_json(&json)
            .with_context(|| format!("Invalid field definitions in {}", path.display()))?;
        debug!(count = definitions.len(), "Loaded field definitions");
        Ok(self.registry.instantiate_all(definitions)?)
    }

    /// Renders the add/edit controls.
    pub fn add_form(
        &self,
        fields: &[Box<dyn DataField>],
        record: Option<i64>,
        values: &[(String, String)],
    ) -> anyhow::Result<String> {
        let form = (!values.is_empty()).then(|| {
            values
                .iter()
                .fold(FormData::new(), |form, (name, value)| {
                    form.with_value(name.clone(), value.as_str())
                })
        });
        let services = self.services();
        let mut page = PageRequirements::new();

        let mut rendered = Vec::with_capacity(fields.len());
        for field in fields {
            let html = field
                .display_add_field(&services, record.map(RecordId::new), form.as_ref())?
                .into_page(&mut page);
            rendered.push(json!({ "id": field.definition().id, "html": html }));
        }

        Ok(serde_json::to_string_pretty(&json!({
            "fields": rendered,
            "behaviors": page.calls(),
        }))?)
    }

    /// Renders the search controls, each preceded by its type icon.
    pub fn search_form(&self, fields: &[Box<dyn DataField>], values: &[(String, String)]) -> String {
        let values: BTreeMap<&str, &str> = values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        let services = self.services();

        fields
            .iter()
            .map(|field| {
                let param = field.definition().search_param_name();
                let value = values.get(param.as_str()).copied().unwrap_or_default();
                format!("{}{}", field.image(&services), field.display_search_field(value))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Search term of each field, keyed by request parameter name.
    pub fn parse_search(
        &self,
        fields: &[Box<dyn DataField>],
        search: &SearchArgs,
    ) -> anyhow::Result<String> {
        let request = QueryParams::from_query(&search.query);
        let defaults = search_defaults(search);

        let terms: BTreeMap<String, String> = fields
            .iter()
            .map(|field| {
                (
                    field.definition().search_param_name(),
                    field.parse_search_field(&request, defaults.as_ref()),
                )
            })
            .collect();
        Ok(serde_json::to_string_pretty(&terms)?)
    }

    /// SQL and bind parameters of a search request.
    pub fn filter(
        &self,
        fields: &[Box<dyn DataField>],
        search: &SearchArgs,
    ) -> anyhow::Result<String> {
        let query = self.search_filter(fields, search).build();
        Ok(serde_json::to_string_pretty(&query)?)
    }

    /// Exported configuration of each field, keyed by field id.
    pub fn config(&self, fields: &[Box<dyn DataField>]) -> anyhow::Result<String> {
        let configs: BTreeMap<String, _> = fields
            .iter()
            .map(|field| (field.definition().id.to_string(), field.config_for_external()))
            .collect();
        Ok(serde_json::to_string_pretty(&configs)?)
    }

    /// Stores `value` for one field of a record.
    pub fn update(
        &self,
        fields: &[Box<dyn DataField>],
        field_id: i64,
        record: i64,
        value: &str,
    ) -> anyhow::Result<String> {
        let field = fields
            .iter()
            .find(|field| field.definition().id.get() == field_id)
            .with_context(|| format!("No field with id {}", field_id))?;

        field.update_content(&self.store, RecordId::new(record), &FieldValue::text(value))?;
        info!(field_id, record, "Stored field content");
        Ok(format!("Updated field {} of record {}", field_id, record))
    }

    /// Stored values of a record, one line per field with content.
    pub fn browse(&self, fields: &[Box<dyn DataField>], record: i64) -> anyhow::Result<String> {
        let services = self.services();
        let mut lines = Vec::new();
        for field in fields {
            if let Some(html) = field.display_browse_field(&services, RecordId::new(record))? {
                lines.push(format!("{}: {}", field.definition().name, html));
            }
        }
        Ok(lines.join("\n"))
    }

    /// Ids of the records matching a search request.
    pub fn search(
        &self,
        fields: &[Box<dyn DataField>],
        search: &SearchArgs,
    ) -> anyhow::Result<String> {
        let filter = self.search_filter(fields, search);
        let records: Vec<i64> = self
            .store
            .search_records(&filter)?
            .into_iter()
            .map(RecordId::get)
            .collect();
        info!(conditions = filter.len(), matches = records.len(), "Search finished");
        Ok(serde_json::to_string(&records)?)
    }

    fn search_filter(&self, fields: &[Box<dyn DataField>], search: &SearchArgs) -> RecordFilter {
        let request = QueryParams::from_query(&search.query);
        let defaults = search_defaults(search);
        let mut ctx = self.config.sql_context();
        build_search_filter(fields, &request, defaults.as_ref(), &mut ctx)
    }
}

fn search_defaults(search: &SearchArgs) -> Option<SearchDefaults> {
    (!search.defaults.is_empty()).then(|| {
        search
            .defaults
            .iter()
            .fold(SearchDefaults::new(), |defaults, (name, value)| {
                defaults.with_value(name.clone(), value.clone())
            })
    })
}
