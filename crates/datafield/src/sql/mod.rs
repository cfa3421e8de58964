//! SQL fragment generation for search filters.
//!
//! Field types translate a search term into a [`SqlFragment`] constraining
//! the content table. Values are always bound as named parameters; names are
//! handed out by the [`SqlBuildContext`] of the query being built.
//!
//! ```
//! use datafield::sql::{SqlBuildContext, SqlDialect, SqlFragment, SqlParam};
//!
//! let mut ctx = SqlBuildContext::new(SqlDialect::Sqlite);
//! let mut frag = SqlFragment::new("");
//! let name = ctx.next_param_name("df_text");
//! let placeholder = frag.bind(name, SqlParam::string("%rust%"));
//! frag.sql = ctx.dialect().sql_like("c.content", &placeholder);
//!
//! assert_eq!(frag.sql, "df_lower(c.content) LIKE df_lower(:df_text_1) ESCAPE '\\'");
//! ```

mod context;
mod dialect;
mod filter;
mod fragment;

pub use context::SqlBuildContext;
pub use dialect::{SQLITE_LOWER_FN, SqlDialect};
pub use filter::{CONTENT_TABLE, RecordFilter};
pub use fragment::{SqlFragment, SqlParam};
