//! Submitted values, form data and search defaults.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A submitted value of arbitrary scalar kind.
///
/// Form submissions and API payloads do not always carry strings, so the
/// emptiness check and the edit form work on the value's string form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    Text(String),
}

impl FieldValue {
    /// Creates a text value.
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    /// String form of the value.
    ///
    /// `Null` and `false` become `""`, `true` becomes `"1"`, integral floats
    /// drop their fractional part.
    pub fn to_form_text(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Bool(true) => "1".to_string(),
            FieldValue::Bool(false) => String::new(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
                    format!("{}", *f as i64)
                } else {
                    f.to_string()
                }
            }
            FieldValue::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// In-flight form data of a record being added or edited, keyed by input
/// name (`field_{id}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    values: HashMap<String, FieldValue>,
}

impl FormData {
    /// Creates empty form data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value under an input name.
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a value under an input name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Returns the value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }
}

/// Default search values keyed by search parameter name (`f_{id}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchDefaults {
    values: HashMap<String, String>,
}

impl SearchDefaults {
    /// Creates empty defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a default.
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Returns the default for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_text_conversion() {
        assert_eq!(FieldValue::Null.to_form_text(), "");
        assert_eq!(FieldValue::Bool(false).to_form_text(), "");
        assert_eq!(FieldValue::Bool(true).to_form_text(), "1");
        assert_eq!(FieldValue::Integer(0).to_form_text(), "0");
        assert_eq!(FieldValue::Float(2.0).to_form_text(), "2");
        assert_eq!(FieldValue::Float(2.5).to_form_text(), "2.5");
        assert_eq!(FieldValue::text(" ").to_form_text(), " ");
    }

    #[test]
    fn test_field_value_untagged_json() {
        let values: Vec<FieldValue> =
            serde_json::from_str(r#"[null, true, 3, 1.5, "text"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Null,
                FieldValue::Bool(true),
                FieldValue::Integer(3),
                FieldValue::Float(1.5),
                FieldValue::text("text"),
            ]
        );
    }

    #[test]
    fn test_form_data_lookup() {
        let form = FormData::new().with_value("field_3", "hello");
        assert_eq!(form.get("field_3"), Some(&FieldValue::text("hello")));
        assert!(form.get("field_4").is_none());
    }
}
