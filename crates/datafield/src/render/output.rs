//! Output rendering collaborator.

use super::escape::s;

/// Renders shared page widgets: icons and wrapper elements.
pub trait OutputRenderer: Send + Sync {
    /// Renders the icon `name` from `component` with accessible text `alt`.
    fn pix_icon(&self, name: &str, alt: &str, component: &str) -> String;

    /// Wraps already-rendered `content` in a div carrying `class`.
    fn div(&self, content: &str, class: &str) -> String {
        format!("<div class=\"{}\">{}</div>", s(class), content)
    }
}

/// Renders icons as `<img>` elements served from a static pix directory.
#[derive(Debug, Clone)]
pub struct HtmlOutput {
    pix_base: String,
}

impl HtmlOutput {
    /// Creates a renderer serving icons from `pix_base`
    /// (e.g. `https://example.org/pix`).
    pub fn new(pix_base: impl Into<String>) -> Self {
        Self {
            pix_base: pix_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Returns the URL of an icon.
    pub fn icon_url(&self, name: &str, component: &str) -> String {
        format!("{}/{}/{}.svg", self.pix_base, component, name)
    }
}

impl OutputRenderer for HtmlOutput {
    fn pix_icon(&self, name: &str, alt: &str, component: &str) -> String {
        format!(
            "<img class=\"icon\" alt=\"{alt}\" title=\"{alt}\" src=\"{src}\" />",
            alt = s(alt),
            src = s(&self.icon_url(name, component)),
        )
    }
}
