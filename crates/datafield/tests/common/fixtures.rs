//! Test fixtures for field type testing.

use datafield::types::{FieldDefinition, FieldId, RecordId};

/// Data activity all fixture fields belong to.
pub const DATA_ID: i64 = 3;

/// A long text field fixture.
#[derive(Debug, Clone)]
pub struct LongTextFixture {
    /// Field ID.
    pub id: i64,
    /// Display label.
    pub name: String,
    /// Help text.
    pub description: String,
    /// Raw `param2` value.
    pub max_length: Option<String>,
    /// Whether a value is required.
    pub required: bool,
}

impl LongTextFixture {
    /// Creates a fixture without length limit.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            max_length: None,
            required: false,
        }
    }

    /// Sets the raw maximum length slot.
    pub fn with_max_length(mut self, max_length: impl Into<String>) -> Self {
        self.max_length = Some(max_length.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Builds the field definition.
    pub fn build(&self) -> FieldDefinition {
        let mut definition = FieldDefinition::new(self.id, DATA_ID, "longtext", self.name.clone())
            .with_description(self.description.clone())
            .with_required(self.required);
        definition.params.param2 = self.max_length.clone();
        definition
    }
}

/// A stored record value.
#[derive(Debug, Clone)]
pub struct ContentFixture {
    /// Field the value belongs to.
    pub field_id: FieldId,
    /// Record the value belongs to.
    pub record_id: RecordId,
    /// Stored text.
    pub content: String,
}

impl ContentFixture {
    /// Creates a content fixture.
    pub fn new(field_id: i64, record_id: i64, content: impl Into<String>) -> Self {
        Self {
            field_id: FieldId::new(field_id),
            record_id: RecordId::new(record_id),
            content: content.into(),
        }
    }
}

/// Predefined fields and records of a small reading list.
#[derive(Debug, Clone)]
pub struct TestFixtures {
    /// Field definitions.
    pub fields: Vec<FieldDefinition>,
    /// Stored values.
    pub contents: Vec<ContentFixture>,
}

impl TestFixtures {
    /// Title and review fields with four records.
    pub fn reading_list() -> Self {
        let fields = vec![
            LongTextFixture::new(1, "Title").required().build(),
            LongTextFixture::new(2, "Review")
                .with_max_length("2000")
                .with_description("Your <em>honest</em> opinion")
                .build(),
        ];

        let contents = vec![
            ContentFixture::new(1, 10, "The Rust Programming Language"),
            ContentFixture::new(2, 10, "Thorough introduction to ownership."),
            ContentFixture::new(1, 11, "Programming Rust"),
            ContentFixture::new(2, 11, "Dense but rewarding; covers UNSAFE code too."),
            ContentFixture::new(1, 12, "Zero To Production"),
            ContentFixture::new(2, 12, "Builds a web service step by step."),
            ContentFixture::new(1, 13, "Rust for Rustaceans"),
            ContentFixture::new(2, 13, "Idiomatic, unsafe-aware, advanced."),
        ];

        Self { fields, contents }
    }
}
