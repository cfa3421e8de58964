//! Field definitions.
//!
//! A [`FieldDefinition`] describes one configured field of a data activity.
//! It is created and edited by the host's field configuration screens; field
//! types only ever read it.

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldResult};

use super::ids::{DataId, FieldId};

/// Number of numbered configuration slots on a field definition.
pub const PARAM_SLOTS: usize = 10;

/// Configuration record of one field instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field identifier.
    pub id: FieldId,

    /// The data activity the field belongs to.
    #[serde(rename = "dataid")]
    pub data_id: DataId,

    /// Field type name (e.g. `"longtext"`).
    #[serde(rename = "type")]
    pub field_type: String,

    /// Display label.
    pub name: String,

    /// Help text. May contain markup and must be escaped on output.
    #[serde(default)]
    pub description: String,

    /// Whether a value must be supplied when adding a record.
    #[serde(default)]
    pub required: bool,

    /// Per-type configuration slots.
    #[serde(flatten)]
    pub params: FieldParams,
}

impl FieldDefinition {
    /// Creates a definition with empty description and parameters.
    pub fn new(
        id: impl Into<FieldId>,
        data_id: impl Into<DataId>,
        field_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            data_id: data_id.into(),
            field_type: field_type.into(),
            name: name.into(),
            description: String::new(),
            required: false,
            params: FieldParams::default(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the field as required.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets parameter slot `n` (1-based).
    pub fn with_param(mut self, n: usize, value: impl Into<String>) -> Self {
        self.params.set(n, Some(value.into()));
        self
    }

    /// Name of the edit-form input, `field_{id}`.
    pub fn input_name(&self) -> String {
        format!("field_{}", self.id)
    }

    /// Name of the search-form input and request parameter, `f_{id}`.
    pub fn search_param_name(&self) -> String {
        format!("f_{}", self.id)
    }

    /// Maximum length hint held in `param2`.
    ///
    /// The slot is parsed like an integer cast: surrounding whitespace is
    /// trimmed, then an optional sign and the leading digits are read.
    /// Anything unparsable counts as zero. Only positive values enable the
    /// hint.
    pub fn max_length(&self) -> Option<u32> {
        let raw = self.params.get(2).unwrap_or_default();
        let parsed = parse_int_prefix(raw);
        if parsed > 0 {
            Some(u32::try_from(parsed).unwrap_or(u32::MAX))
        } else {
            None
        }
    }

    /// Parses a JSON document holding one definition or an array of them.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidDefinition`] if the document is not valid
    /// JSON or does not describe field definitions.
    pub fn list_from_json(json: &str) -> FieldResult<Vec<Self>> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| FieldError::InvalidDefinition {
                message: e.to_string(),
            })?;

        let definitions = if value.is_array() {
            serde_json::from_value(value)
        } else {
            serde_json::from_value(value).map(|definition| vec![definition])
        };
        definitions.map_err(|e| FieldError::InvalidDefinition {
            message: e.to_string(),
        })
    }
}

/// Reads the leading integer of `raw` the way a loose integer cast does.
///
/// `" 12 "` gives 12, `"12abc"` gives 12, `"abc"` gives 0, `"-3"` gives -3.
pub fn parse_int_prefix(raw: &str) -> i64 {
    let trimmed = raw.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'));
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    if negative { -value } else { value }
}

/// The ten opaque configuration slots `param1`..`param10`.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldParams {
    #[serde(default)]
    pub param1: Option<String>,
    #[serde(default)]
    pub param2: Option<String>,
    #[serde(default)]
    pub param3: Option<String>,
    #[serde(default)]
    pub param4: Option<String>,
    #[serde(default)]
    pub param5: Option<String>,
    #[serde(default)]
    pub param6: Option<String>,
    #[serde(default)]
    pub param7: Option<String>,
    #[serde(default)]
    pub param8: Option<String>,
    #[serde(default)]
    pub param9: Option<String>,
    #[serde(default)]
    pub param10: Option<String>,
}

impl FieldParams {
    fn slot(&self, n: usize) -> Option<&Option<String>> {
        match n {
            1 => Some(&self.param1),
            2 => Some(&self.param2),
            3 => Some(&self.param3),
            4 => Some(&self.param4),
            5 => Some(&self.param5),
            6 => Some(&self.param6),
            7 => Some(&self.param7),
            8 => Some(&self.param8),
            9 => Some(&self.param9),
            10 => Some(&self.param10),
            _ => None,
        }
    }

    fn slot_mut(&mut self, n: usize) -> Option<&mut Option<String>> {
        match n {
            1 => Some(&mut self.param1),
            2 => Some(&mut self.param2),
            3 => Some(&mut self.param3),
            4 => Some(&mut self.param4),
            5 => Some(&mut self.param5),
            6 => Some(&mut self.param6),
            7 => Some(&mut self.param7),
            8 => Some(&mut self.param8),
            9 => Some(&mut self.param9),
            10 => Some(&mut self.param10),
            _ => None,
        }
    }

    /// Returns slot `n` (1-based). Out-of-range slots read as unset.
    pub fn get(&self, n: usize) -> Option<&str> {
        self.slot(n).and_then(|v| v.as_deref())
    }

    /// Sets slot `n` (1-based). Out-of-range slots are ignored.
    pub fn set(&mut self, n: usize, value: Option<String>) {
        if let Some(slot) = self.slot_mut(n) {
            *slot = value;
        } else {
            tracing::debug!(slot = n, "Ignoring out-of-range field parameter slot");
        }
    }

    /// Iterates `(slot name, value)` in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (String, Option<&str>)> + '_ {
        (1..=PARAM_SLOTS).map(move |n| (format!("param{}", n), self.get(n)))
    }
}
