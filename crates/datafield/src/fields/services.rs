//! Collaborators handed to field types.

use crate::i18n::Localizer;
use crate::link::UrlBuilder;
use crate::render::OutputRenderer;
use crate::storage::ContentStore;

/// The host services a field type needs while handling one request.
///
/// Everything is borrowed: the services outlive the call and field types
/// keep no reference to them.
#[derive(Clone, Copy)]
pub struct FieldServices<'a> {
    /// Stored field content.
    pub store: &'a dyn ContentStore,
    /// Icons and wrapper elements.
    pub output: &'a dyn OutputRenderer,
    /// Links to host pages.
    pub urls: &'a dyn UrlBuilder,
    /// Localized strings.
    pub strings: &'a dyn Localizer,
    /// Anti-forgery token of the current session.
    pub sesskey: &'a str,
}

impl<'a> FieldServices<'a> {
    /// Bundles the services, with an empty session key.
    pub fn new(
        store: &'a dyn ContentStore,
        output: &'a dyn OutputRenderer,
        urls: &'a dyn UrlBuilder,
        strings: &'a dyn Localizer,
    ) -> Self {
        Self {
            store,
            output,
            urls,
            strings,
            sesskey: "",
        }
    }

    /// Sets the session key.
    pub fn with_sesskey(mut self, sesskey: &'a str) -> Self {
        self.sesskey = sesskey;
        self
    }
}

impl std::fmt::Debug for FieldServices<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldServices").finish_non_exhaustive()
    }
}
