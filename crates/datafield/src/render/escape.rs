//! HTML escaping for interpolated text.

use std::sync::LazyLock;

use regex::Regex;

static DOUBLE_ENCODED_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)&amp;#(\d+|x[0-9a-f]+);").expect("numeric entity pattern is valid")
});

/// Escapes text for safe use in element content and quoted attributes.
///
/// `& < > " '` are encoded. Numeric character references already present in
/// the input (`&#39;`, `&#x2603;`) are left intact instead of being encoded
/// twice.
pub fn s(text: &str) -> String {
    let encoded = html_escape::encode_quoted_attribute(text);
    DOUBLE_ENCODED_ENTITY
        .replace_all(&encoded, "&#$1;")
        .into_owned()
}
