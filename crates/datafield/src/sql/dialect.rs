//! Database dialects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// SQL dialect used when writing fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    /// SQLite.
    #[default]
    Sqlite,
    /// PostgreSQL.
    Postgres,
}

/// Name of the Unicode-aware lowercase function registered on SQLite
/// connections. The built-in `LOWER` only folds ASCII letters.
pub const SQLITE_LOWER_FN: &str = "df_lower";

impl SqlDialect {
    /// Writes a case-insensitive LIKE comparison of `field` against the
    /// placeholder `param`.
    ///
    /// The pattern is bound, never interpolated. Backslash is the escape
    /// character in both dialects. SQLite statements call
    /// [`SQLITE_LOWER_FN`], which the connection must provide.
    pub fn sql_like(&self, field: &str, param: &str) -> String {
        match self {
            SqlDialect::Sqlite => format!(
                "{lower}({field}) LIKE {lower}({param}) ESCAPE '\\'",
                lower = SQLITE_LOWER_FN,
            ),
            SqlDialect::Postgres => format!("{} ILIKE {} ESCAPE '\\'", field, param),
        }
    }

    /// Returns the dialect name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SqlDialect::Sqlite => "sqlite",
            SqlDialect::Postgres => "postgres",
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SqlDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(SqlDialect::Sqlite),
            "postgres" | "postgresql" | "pgsql" => Ok(SqlDialect::Postgres),
            other => Err(format!("unsupported SQL dialect: {}", other)),
        }
    }
}
