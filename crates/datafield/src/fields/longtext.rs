//! Long text field.
//!
//! A multi-line text value with an optional maximum length (`param2`).
//! When a maximum is configured the textarea carries a `maxlength` hint and
//! a live character counter. The limit is advisory only; nothing is
//! truncated on the server.

use serde_json::json;

use crate::error::FieldResult;
use crate::i18n::StringArgs;
use crate::render::{ClientBehavior, RenderedField, s};
use crate::request::{ParamType, RequestParams};
use crate::sql::{SqlBuildContext, SqlFragment, SqlParam};
use crate::types::{FieldDefinition, FieldValue, FormData, RecordId, SearchDefaults};

use super::{DataField, FieldServices, SearchPriority};

/// Type name of the long text field.
pub const LONGTEXT: &str = "longtext";

/// Client module driving the character counter.
const COUNTER_MODULE: &str = "datafield_longtext/main";

/// Prefix of bind parameter names in generated filters.
const PARAM_PREFIX: &str = "df_text";

/// Long text field type.
#[derive(Debug, Clone)]
pub struct LongTextField {
    field: FieldDefinition,
}

impl LongTextField {
    /// Creates the field from its definition.
    pub fn new(field: FieldDefinition) -> Self {
        Self { field }
    }

    /// Registry constructor.
    pub fn boxed(field: FieldDefinition) -> Box<dyn DataField> {
        Box::new(Self::new(field))
    }

    /// Current value for the edit form.
    fn current_content(
        &self,
        services: &FieldServices<'_>,
        record_id: Option<RecordId>,
        form_data: Option<&FormData>,
    ) -> FieldResult<String> {
        if let Some(form) = form_data {
            return Ok(form
                .get(&self.field.input_name())
                .map(FieldValue::to_form_text)
                .unwrap_or_default());
        }

        match record_id.filter(|id| id.get() != 0) {
            Some(record_id) => Ok(services
                .store
                .get_content(self.field.id, record_id)?
                .unwrap_or_default()),
            None => Ok(String::new()),
        }
    }
}

impl DataField for LongTextField {
    fn field_type(&self) -> &'static str {
        LONGTEXT
    }

    fn definition(&self) -> &FieldDefinition {
        &self.field
    }

    fn search_priority(&self) -> SearchPriority {
        SearchPriority::Max
    }

    fn display_add_field(
        &self,
        services: &FieldServices<'_>,
        record_id: Option<RecordId>,
        form_data: Option<&FormData>,
    ) -> FieldResult<RenderedField> {
        let content = self.current_content(services, record_id, form_data)?;
        let input = self.field.input_name();
        let max = self.field.max_length();
        let escaped = s(&content);

        let mut html = format!("<div title=\"{}\">", s(&self.field.description));
        html.push_str(&format!(
            "<label for=\"{}\"><span class=\"accesshide\">{}</span>",
            input,
            s(&self.field.name)
        ));
        if self.field.required {
            let alt = services.strings.get_string("requiredelement", "form", None);
            let image = services.output.pix_icon("req", &alt, "core");
            html.push_str(&services.output.div(&image, "inline-req"));
        }

        let maxproperty = max
            .map(|max| format!(" maxlength=\"{}\" ", max))
            .unwrap_or_default();
        html.push_str(&format!(
            "</label><textarea class=\"basefieldinput form-control d-inline mod-data-input\" \
             type=\"text\" name=\"{input}\" id=\"{input}\"{maxproperty}>{escaped}</textarea>",
        ));

        let mut rendered = RenderedField::default();
        if let Some(max) = max {
            // The counter starts from the escaped length, as the page shows it.
            let args = StringArgs::named([("current", escaped.len() as u64), ("max", u64::from(max))]);
            html.push_str(&format!(
                "<br /><span class=\"maxchars\" data-control=\"{}\">{}</span>",
                input,
                services
                    .strings
                    .get_string("maxcharsrequired", "datafield_longtext", Some(&args))
            ));
            rendered = rendered.with_behavior(ClientBehavior::new(
                COUNTER_MODULE,
                "init",
                vec![json!(input)],
            ));
        }

        html.push_str("</div>");
        rendered.html = html;
        Ok(rendered)
    }

    fn display_search_field(&self, value: &str) -> String {
        let param = self.field.search_param_name();
        format!(
            "<label class=\"accesshide\" for=\"{param}\">{name}</label>\
             <input type=\"text\" class=\"form-control\" size=\"16\" id=\"{param}\" \
             name=\"{param}\" value=\"{value}\" />",
            name = s(&self.field.name),
            value = s(value),
        )
    }

    fn parse_search_field(
        &self,
        request: &dyn RequestParams,
        defaults: Option<&SearchDefaults>,
    ) -> String {
        let param = self.field.search_param_name();
        // "0" is treated as no default, like an unset one.
        let default = defaults
            .and_then(|defaults| defaults.get(&param))
            .filter(|value| !value.is_empty() && *value != "0")
            .unwrap_or("");
        request.optional_param(&param, default, ParamType::NoTags)
    }

    fn generate_sql(
        &self,
        ctx: &mut SqlBuildContext,
        table_alias: &str,
        value: &str,
    ) -> SqlFragment {
        let name = ctx.next_param_name(PARAM_PREFIX);
        let mut fragment = SqlFragment::new("");
        // Backslash is the LIKE escape character, so a literal one is doubled.
        // `%` and `_` in the term stay wildcards.
        let pattern = format!("%{}%", value.replace('\\', "\\\\"));
        let placeholder = fragment.bind(name, SqlParam::string(pattern));

        let like = ctx
            .dialect()
            .sql_like(&format!("{}.content", table_alias), &placeholder);
        fragment.sql = format!(
            " ({}.fieldid = {} AND {}) ",
            table_alias, self.field.id, like
        );

        tracing::debug!(
            field_id = %self.field.id,
            placeholder = %placeholder,
            dialect = %ctx.dialect(),
            "Generated long text filter"
        );
        fragment
    }

    fn is_empty_field(&self, value: &FieldValue, _name: &str) -> bool {
        value.to_form_text().is_empty()
    }

    fn display_browse_field(
        &self,
        services: &FieldServices<'_>,
        record_id: RecordId,
    ) -> FieldResult<Option<String>> {
        let content = services.store.get_content(self.field.id, record_id)?;
        Ok(content.map(|content| {
            s(&content)
                .replace("\r\n", "\n")
                .replace('\n', "<br />")
        }))
    }

    fn text_export_supported(&self) -> bool {
        true
    }
}
