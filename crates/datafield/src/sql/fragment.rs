//! SQL fragments with named bind parameters.

use std::collections::BTreeMap;

use serde::Serialize;

/// A fragment of SQL with named bound parameters.
///
/// Placeholders in `sql` are written `:name`; `params` maps each `name`
/// (without the colon) to its value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SqlFragment {
    /// The SQL clause.
    pub sql: String,
    /// Bound parameter values by name.
    pub params: BTreeMap<String, SqlParam>,
}

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlParam {
    /// String parameter.
    String(String),
    /// Integer parameter.
    Integer(i64),
    /// Float parameter.
    Float(f64),
    /// Null parameter.
    Null,
}

impl SqlParam {
    /// Creates a string parameter.
    pub fn string(s: impl Into<String>) -> Self {
        SqlParam::String(s.into())
    }

    /// Creates an integer parameter.
    pub fn integer(i: i64) -> Self {
        SqlParam::Integer(i)
    }

    /// Returns the string value, if this is a string parameter.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlParam::String(s) => Some(s),
            _ => None,
        }
    }
}

impl SqlFragment {
    /// Creates a fragment without parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: BTreeMap::new(),
        }
    }

    /// Creates a fragment with parameters.
    pub fn with_params(
        sql: impl Into<String>,
        params: impl IntoIterator<Item = (String, SqlParam)>,
    ) -> Self {
        Self {
            sql: sql.into(),
            params: params.into_iter().collect(),
        }
    }

    /// Binds `param` under `name` and returns the placeholder string.
    pub fn bind(&mut self, name: impl Into<String>, param: SqlParam) -> String {
        let name = name.into();
        let placeholder = format!(":{}", name);
        self.params.insert(name, param);
        placeholder
    }

    /// Combines with another fragment using AND.
    pub fn and(self, other: SqlFragment) -> Self {
        self.combine(other, "AND")
    }

    /// Combines with another fragment using OR.
    pub fn or(self, other: SqlFragment) -> Self {
        self.combine(other, "OR")
    }

    fn combine(mut self, other: SqlFragment, op: &str) -> Self {
        if !self.sql.trim().is_empty() && !other.sql.trim().is_empty() {
            self.sql = format!("({}) {} ({})", self.sql.trim(), op, other.sql.trim());
        } else if !other.sql.trim().is_empty() {
            self.sql = other.sql;
        }
        for (name, param) in other.params {
            if self.params.contains_key(&name) {
                tracing::warn!(param = %name, "Bind parameter name reused while combining fragments");
            }
            self.params.insert(name, param);
        }
        self
    }

    /// Returns true if this fragment has no SQL.
    pub fn is_empty(&self) -> bool {
        self.sql.trim().is_empty()
    }
}

#[cfg(feature = "sqlite")]
impl rusqlite::ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
        use rusqlite::types::{ToSqlOutput, Value, ValueRef};

        Ok(match self {
            SqlParam::String(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            SqlParam::Integer(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            SqlParam::Float(f) => ToSqlOutput::Owned(Value::Real(*f)),
            SqlParam::Null => ToSqlOutput::Owned(Value::Null),
        })
    }
}
