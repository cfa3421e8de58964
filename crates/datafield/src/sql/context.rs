//! Query-building context.
//!
//! Several search fields can contribute fragments to one compound query, so
//! bind parameter names must not repeat within that query. The context owns
//! the counter that guarantees this. Create one per query and pass it down
//! the building chain; nothing is shared between queries.

use super::dialect::SqlDialect;

/// State carried through the building of one compound query.
#[derive(Debug, Clone)]
pub struct SqlBuildContext {
    dialect: SqlDialect,
    counter: usize,
}

impl SqlBuildContext {
    /// Creates a context for the given dialect.
    pub fn new(dialect: SqlDialect) -> Self {
        Self { dialect, counter: 0 }
    }

    /// Returns the dialect fragments should be written in.
    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// Returns a bind parameter name unique within this context,
    /// `{prefix}_{n}` with `n` starting at 1.
    pub fn next_param_name(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{}_{}", prefix, self.counter)
    }

    /// Number of parameter names handed out so far.
    pub fn issued(&self) -> usize {
        self.counter
    }
}

impl Default for SqlBuildContext {
    fn default() -> Self {
        Self::new(SqlDialect::default())
    }
}
