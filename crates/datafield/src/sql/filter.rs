//! Record filters built from per-field fragments.
//!
//! Every search field constrains its own content row, so each contributes a
//! join of the content table under a distinct alias. All conditions must
//! hold for a record to match.

use super::fragment::SqlFragment;

/// Name of the table holding per-record field content.
pub const CONTENT_TABLE: &str = "data_content";

/// Builds a query selecting the records matching every added condition.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    conditions: Vec<(String, SqlFragment)>,
}

impl RecordFilter {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias the next condition should use for its content row.
    pub fn next_alias(&self) -> String {
        format!("c{}", self.conditions.len() + 1)
    }

    /// Adds a condition written against `alias`.
    pub fn push(&mut self, alias: impl Into<String>, fragment: SqlFragment) {
        self.conditions.push((alias.into(), fragment));
    }

    /// Number of conditions.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Returns true if no condition was added.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Builds the record id query.
    ///
    /// Without conditions every record with stored content matches.
    pub fn build(&self) -> SqlFragment {
        let mut sql = format!("SELECT DISTINCT r.recordid FROM {} r", CONTENT_TABLE);
        let mut combined = SqlFragment::new("");

        for (alias, fragment) in &self.conditions {
            sql.push_str(&format!(
                " JOIN {table} {alias} ON {alias}.recordid = r.recordid",
                table = CONTENT_TABLE,
                alias = alias,
            ));
            combined = combined.and(fragment.clone());
        }

        if !combined.is_empty() {
            sql.push_str(&format!(" WHERE {}", combined.sql));
        }
        sql.push_str(" ORDER BY r.recordid");

        SqlFragment {
            sql,
            params: combined.params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::SqlParam;

    #[test]
    fn test_empty_filter() {
        let filter = RecordFilter::new();
        assert!(filter.is_empty());
        assert_eq!(
            filter.build().sql,
            "SELECT DISTINCT r.recordid FROM data_content r ORDER BY r.recordid"
        );
    }

    #[test]
    fn test_joins_one_alias_per_condition() {
        let mut filter = RecordFilter::new();
        let first = filter.next_alias();
        filter.push(
            first.clone(),
            SqlFragment::with_params(
                format!("{}.fieldid = 1", first),
                [("p1".to_string(), SqlParam::string("a"))],
            ),
        );
        let second = filter.next_alias();
        filter.push(second.clone(), SqlFragment::new(format!("{}.fieldid = 2", second)));

        let query = filter.build();
        assert_eq!(filter.len(), 2);
        assert!(query.sql.contains("JOIN data_content c1 ON c1.recordid = r.recordid"));
        assert!(query.sql.contains("JOIN data_content c2 ON c2.recordid = r.recordid"));
        assert!(query.sql.contains("WHERE (c1.fieldid = 1) AND (c2.fieldid = 2)"));
        assert_eq!(query.params.len(), 1);
    }
}
