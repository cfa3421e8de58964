//! Advanced search across several fields.

use crate::request::RequestParams;
use crate::sql::{RecordFilter, SqlBuildContext};
use crate::types::SearchDefaults;

use super::DataField;

/// Builds the record filter for an advanced search request.
///
/// Every field reads its own search term; fields without a term are
/// skipped. Each remaining field constrains a separate content row, and
/// all bind names are drawn from `ctx`, so they never collide.
pub fn build_search_filter(
    fields: &[Box<dyn DataField>],
    request: &dyn RequestParams,
    defaults: Option<&SearchDefaults>,
    ctx: &mut SqlBuildContext,
) -> RecordFilter {
    let mut filter = RecordFilter::new();

    for field in fields {
        let value = field.parse_search_field(request, defaults);
        if value.is_empty() {
            continue;
        }

        let alias = filter.next_alias();
        let fragment = field.generate_sql(ctx, &alias, &value);
        tracing::debug!(
            field_id = %field.definition().id,
            alias = %alias,
            "Added search condition"
        );
        filter.push(alias, fragment);
    }

    tracing::debug!(conditions = filter.len(), "Built search filter");
    filter
}
