//! Collaborators for rendering fields in tests.

use datafield::error::StorageResult;
use datafield::fields::FieldServices;
use datafield::i18n::StringCatalog;
use datafield::link::WwwRootUrlBuilder;
use datafield::render::HtmlOutput;
use datafield::storage::{ContentStore, MemoryContentStore};

use super::fixtures::TestFixtures;

/// Site root used by the harness.
pub const WWWROOT: &str = "https://lms.test";

/// Session key used by the harness.
pub const SESSKEY: &str = "abc123";

/// Owns a content store and the rendering collaborators.
pub struct TestContext<S: ContentStore = MemoryContentStore> {
    /// Content store.
    pub store: S,
    /// Output renderer.
    pub output: HtmlOutput,
    /// URL builder.
    pub urls: WwwRootUrlBuilder,
    /// String catalog.
    pub strings: StringCatalog,
}

impl TestContext<MemoryContentStore> {
    /// Creates a context over an empty in-memory store.
    pub fn new() -> Self {
        Self::with_store(MemoryContentStore::new())
    }
}

impl<S: ContentStore> TestContext<S> {
    /// Creates a context over `store`.
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            output: HtmlOutput::new(format!("{}/pix", WWWROOT)),
            urls: WwwRootUrlBuilder::new(WWWROOT).expect("valid wwwroot"),
            strings: StringCatalog::with_builtin_strings(),
        }
    }

    /// Services borrowing this context.
    pub fn services(&self) -> FieldServices<'_> {
        FieldServices::new(&self.store, &self.output, &self.urls, &self.strings)
            .with_sesskey(SESSKEY)
    }

    /// Stores every fixture value.
    pub fn seed(&self, fixtures: &TestFixtures) -> StorageResult<()> {
        for content in &fixtures.contents {
            self.store
                .set_content(content.field_id, content.record_id, &content.content)?;
        }
        Ok(())
    }
}
