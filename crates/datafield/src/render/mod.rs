//! HTML rendering support.
//!
//! - [`s`] - escaping of interpolated text
//! - [`OutputRenderer`] - icons and wrapper elements
//! - [`ClientBehavior`], [`PageRequirements`] - declarative script hooks
//! - [`RenderedField`] - markup plus the behaviours it needs

mod behavior;
mod escape;
mod output;

pub use behavior::{ClientBehavior, PageRequirements};
pub use escape::s;
pub use output::{HtmlOutput, OutputRenderer};

/// Result of rendering a form control.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedField {
    /// The HTML fragment.
    pub html: String,
    /// Behaviours the fragment relies on.
    pub behaviors: Vec<ClientBehavior>,
}

impl RenderedField {
    /// Creates a rendered field without behaviours.
    pub fn html(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            behaviors: Vec::new(),
        }
    }

    /// Attaches a behaviour.
    pub fn with_behavior(mut self, behavior: ClientBehavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// Moves the behaviours into the page and returns the markup.
    pub fn into_page(self, page: &mut PageRequirements) -> String {
        page.require(self.behaviors);
        self.html
    }
}
