//! Request parameter access and cleaning.
//!
//! Search values arrive from untrusted request data. They are cleaned with a
//! [`ParamType`] policy before any field type sees them; for free text the
//! policy is [`ParamType::NoTags`], which removes markup outright.

use std::collections::HashMap;

use crate::types::parse_int_prefix;

/// Cleaning policy applied to a raw request parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// No cleaning.
    Raw,
    /// Markup removed.
    NoTags,
    /// Loosely parsed integer, rendered back as a string.
    Int,
}

/// Cleans `value` according to `param_type`.
pub fn clean_param(value: &str, param_type: ParamType) -> String {
    match param_type {
        ParamType::Raw => value.to_string(),
        ParamType::NoTags => strip_tags(value),
        ParamType::Int => parse_int_prefix(value).to_string(),
    }
}

/// Removes tags, comments and NUL bytes from `input`.
///
/// A `<` followed by whitespace or ending the input is ordinary text. Quoted
/// attribute values may contain `>`. An unterminated tag or comment removes
/// everything after its opening `<`.
pub fn strip_tags(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\0' => i += 1,
            '<' if chars.get(i + 1).is_some_and(|next| !next.is_whitespace()) => {
                match skip_markup(&chars, i) {
                    Some(next) => i = next,
                    None => break,
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// Returns the index just past the tag or comment opening at `start`, or
/// `None` if it never closes.
fn skip_markup(chars: &[char], start: usize) -> Option<usize> {
    if chars[start..].starts_with(&['<', '!', '-', '-']) {
        let body = start + 4;
        return (body..chars.len().saturating_sub(2))
            .find(|&j| chars[j] == '-' && chars[j + 1] == '-' && chars[j + 2] == '>')
            .map(|j| j + 3);
    }

    let mut quote: Option<char> = None;
    for (j, &ch) in chars.iter().enumerate().skip(start + 1) {
        match (quote, ch) {
            (Some(q), ch) if ch == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '>') => return Some(j + 1),
            (None, _) => {}
        }
    }
    None
}

/// Read access to the parameters of the current request.
pub trait RequestParams {
    /// Returns the raw, uncleaned value of `name`.
    fn raw_param(&self, name: &str) -> Option<String>;

    /// Returns `name` cleaned with `param_type`, or `default` when the
    /// request does not carry it. The default is returned as given.
    fn optional_param(&self, name: &str, default: &str, param_type: ParamType) -> String {
        match self.raw_param(name) {
            Some(raw) => clean_param(&raw, param_type),
            None => default.to_string(),
        }
    }
}

/// Request parameters held in memory, e.g. decoded from a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    /// Creates empty params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates params from a map.
    pub fn from_map(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Decodes an `application/x-www-form-urlencoded` string.
    ///
    /// When a name repeats, the last value wins.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Self { params }
    }

    /// Adds a parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl RequestParams for QueryParams {
    fn raw_param(&self, name: &str) -> Option<String> {
        self.params.get(name).cloned()
    }
}
