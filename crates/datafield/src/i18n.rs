//! Localized strings.
//!
//! Strings are looked up by key within a component (`form`,
//! `datafield_longtext`, ...). Placeholders `{$a}` and `{$a->name}` are
//! replaced from [`StringArgs`].

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\$a(?:->(\w+))?\}").expect("placeholder pattern is valid")
});

/// Substitution data for a localized string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringArgs {
    /// Replaces `{$a}`.
    Single(String),
    /// Replaces `{$a->name}` for each name.
    Named(BTreeMap<String, String>),
}

impl StringArgs {
    /// Builds named arguments from pairs.
    pub fn named<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        StringArgs::Named(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }

    fn lookup(&self, name: Option<&str>) -> Option<&str> {
        match (self, name) {
            (StringArgs::Single(value), None) => Some(value),
            (StringArgs::Named(map), Some(name)) => map.get(name).map(String::as_str),
            _ => None,
        }
    }
}

/// Resolves message keys into display text.
pub trait Localizer: Send + Sync {
    /// Returns the text of `key` in `component` with `args` substituted.
    fn get_string(&self, key: &str, component: &str, args: Option<&StringArgs>) -> String;
}

/// In-memory string catalog.
#[derive(Debug, Clone, Default)]
pub struct StringCatalog {
    strings: HashMap<(String, String), String>,
}

impl StringCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the English strings used by the built-in
    /// field types.
    pub fn with_builtin_strings() -> Self {
        let mut catalog = Self::new();
        catalog.set("form", "requiredelement", "Required field");
        catalog.set("datafield_longtext", "pluginname", "Long text");
        catalog.set("datafield_longtext", "fieldtypelabel", "Long text");
        catalog.set(
            "datafield_longtext",
            "maxcharsrequired",
            "{$a->current} of {$a->max} characters",
        );
        catalog
    }

    /// Adds or replaces a string.
    pub fn set(&mut self, component: &str, key: &str, text: impl Into<String>) {
        self.strings
            .insert((component.to_string(), key.to_string()), text.into());
    }

    /// Adds or replaces every `key => text` pair of `component`.
    pub fn extend(&mut self, component: &str, strings: impl IntoIterator<Item = (String, String)>) {
        for (key, text) in strings {
            self.set(component, &key, text);
        }
    }

    /// Returns true if `key` exists in `component`.
    pub fn contains(&self, component: &str, key: &str) -> bool {
        self.strings
            .contains_key(&(component.to_string(), key.to_string()))
    }
}

impl Localizer for StringCatalog {
    fn get_string(&self, key: &str, component: &str, args: Option<&StringArgs>) -> String {
        let Some(text) = self.strings.get(&(component.to_string(), key.to_string())) else {
            tracing::debug!(key, component, "Missing localized string");
            return format!("[[{}]]", key);
        };

        match args {
            Some(args) => substitute(text, args),
            None => text.clone(),
        }
    }
}

/// Replaces placeholders in `text`. Placeholders without a matching
/// argument are left in place.
fn substitute(text: &str, args: &StringArgs) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| {
            let name = caps.get(1).map(|m| m.as_str());
            args.lookup(name)
                .map(str::to_string)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
