//! Long text field integration tests.
//!
//! These tests drive the field through the registry and the public
//! collaborators, the way a host page would.

mod common;

use serde_json::json;

use datafield::fields::{DataField, FieldTypeRegistry};
use datafield::render::PageRequirements;
use datafield::request::QueryParams;
use datafield::sql::{SqlBuildContext, SqlDialect, SqlParam};
use datafield::types::{FieldValue, FormData, RecordId, SearchDefaults};

use common::{LongTextFixture, SESSKEY, TestContext, TestFixtures, WWWROOT};

fn create_field(fixture: &LongTextFixture) -> Box<dyn DataField> {
    FieldTypeRegistry::with_builtin_types()
        .instantiate(fixture.build())
        .expect("longtext is registered")
}

// ============================================================================
// Edit form
// ============================================================================

#[test]
fn test_max_length_variants() {
    let ctx = TestContext::new();
    let cases = [
        (None, None),
        (Some(""), None),
        (Some("lots"), None),
        (Some("0"), None),
        (Some("-20"), None),
        (Some("140"), Some(140)),
        (Some(" 80 "), Some(80)),
        (Some("25chars"), Some(25)),
    ];

    for (raw, expected) in cases {
        let mut fixture = LongTextFixture::new(5, "Notes");
        fixture.max_length = raw.map(str::to_string);
        let rendered = create_field(&fixture)
            .display_add_field(&ctx.services(), None, None)
            .unwrap();

        match expected {
            Some(max) => {
                assert!(
                    rendered.html.contains(&format!(" maxlength=\"{}\" ", max)),
                    "param2 = {:?}",
                    raw
                );
                assert!(rendered.html.contains(&format!("0 of {} characters", max)));
                assert_eq!(rendered.behaviors.len(), 1);
            }
            None => {
                assert!(!rendered.html.contains("maxlength"), "param2 = {:?}", raw);
                assert!(!rendered.html.contains("class=\"maxchars\""));
                assert!(rendered.behaviors.is_empty());
            }
        }
    }
}

#[test]
fn test_counter_behavior_reaches_page() {
    let ctx = TestContext::new();
    let fields = [
        create_field(&LongTextFixture::new(1, "One").with_max_length("10")),
        create_field(&LongTextFixture::new(2, "Two")),
        create_field(&LongTextFixture::new(3, "Three").with_max_length("30")),
    ];

    let mut page = PageRequirements::new();
    for field in &fields {
        field
            .display_add_field(&ctx.services(), None, None)
            .unwrap()
            .into_page(&mut page);
    }

    let calls: serde_json::Value = serde_json::from_str(&page.to_json().unwrap()).unwrap();
    assert_eq!(
        calls,
        json!([
            {"module": "datafield_longtext/main", "function": "init", "args": ["field_1"]},
            {"module": "datafield_longtext/main", "function": "init", "args": ["field_3"]}
        ])
    );
}

#[test]
fn test_edit_form_shows_stored_content() {
    let ctx = TestContext::new();
    let fixtures = TestFixtures::reading_list();
    ctx.seed(&fixtures).unwrap();

    let field = FieldTypeRegistry::with_builtin_types()
        .instantiate(fixtures.fields[0].clone())
        .unwrap();
    let html = field
        .display_add_field(&ctx.services(), Some(RecordId::new(11)), None)
        .unwrap()
        .html;

    assert!(html.contains(">Programming Rust</textarea>"));
    assert!(html.contains("<div class=\"inline-req\">"));
}

#[test]
fn test_edit_form_escapes_markup() {
    let ctx = TestContext::new();
    let field = create_field(
        &LongTextFixture::new(9, "<i>Name</i>").with_description("say \"hi\""),
    );
    let form = FormData::new().with_value("field_9", "</textarea><script>alert(1)</script>");

    let html = field
        .display_add_field(&ctx.services(), None, Some(&form))
        .unwrap()
        .html;

    assert!(html.starts_with("<div title=\"say &quot;hi&quot;\">"));
    assert!(html.contains("&lt;i&gt;Name&lt;/i&gt;"));
    assert!(html.contains("&lt;/textarea&gt;&lt;script&gt;alert(1)&lt;/script&gt;</textarea>"));
    assert!(!html.contains("<script>"));
    assert_eq!(html.matches("</textarea>").count(), 1);
}

#[test]
fn test_form_data_without_value_renders_empty() {
    let ctx = TestContext::new();
    ctx.seed(&TestFixtures::reading_list()).unwrap();
    let field = create_field(&LongTextFixture::new(1, "Title"));
    let form = FormData::new().with_value("field_2", "other field");

    let html = field
        .display_add_field(&ctx.services(), Some(RecordId::new(10)), Some(&form))
        .unwrap()
        .html;

    assert!(html.contains("id=\"field_1\"></textarea>"));
}

#[test]
fn test_localized_counter() {
    let mut ctx = TestContext::new();
    ctx.strings.set(
        "datafield_longtext",
        "maxcharsrequired",
        "{$a->current}/{$a->max} caractères",
    );
    let field = create_field(&LongTextFixture::new(4, "Résumé").with_max_length("50"));

    let html = field
        .display_add_field(&ctx.services(), None, None)
        .unwrap()
        .html;

    assert!(html.contains("data-control=\"field_4\">0/50 caractères</span>"));
}

// ============================================================================
// Icon
// ============================================================================

#[test]
fn test_image_link() {
    let ctx = TestContext::new();
    let html = create_field(&LongTextFixture::new(2, "Review")).image(&ctx.services());

    assert!(html.starts_with(&format!(
        "<a href=\"{}/mod/data/field.php?d=3&amp;fid=2&amp;mode=display&amp;sesskey={}\">",
        WWWROOT, SESSKEY
    )));
    assert!(html.contains("src=\"https://lms.test/pix/datafield_longtext/field/longtext.svg\""));
    assert!(html.ends_with("/></a>"));
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn test_search_round_trip_through_request() {
    let field = create_field(&LongTextFixture::new(6, "Keywords"));
    let request = QueryParams::from_query("?f_6=%3Cem%3Eborrow%3C%2Fem%3E+checker&f_7=x");

    let value = field.parse_search_field(&request, None);
    assert_eq!(value, "borrow checker");

    let html = field.display_search_field(&value);
    assert!(html.contains("value=\"borrow checker\""));
    assert!(html.contains("name=\"f_6\""));
}

#[test]
fn test_search_defaults() {
    let field = create_field(&LongTextFixture::new(6, "Keywords"));
    let defaults = SearchDefaults::new().with_value("f_6", "lifetimes");

    assert_eq!(field.parse_search_field(&QueryParams::new(), Some(&defaults)), "lifetimes");
    assert_eq!(field.parse_search_field(&QueryParams::new(), None), "");

    let other = SearchDefaults::new().with_value("f_60", "nope");
    assert_eq!(field.parse_search_field(&QueryParams::new(), Some(&other)), "");
}

#[test]
fn test_generate_sql_sequence() {
    let field = create_field(&LongTextFixture::new(12, "Body"));
    let mut ctx = SqlBuildContext::new(SqlDialect::Sqlite);

    let first = field.generate_sql(&mut ctx, "c", "abc");
    let second = field.generate_sql(&mut ctx, "c", "xyz");

    assert!(first.sql.contains(":df_text_1"));
    assert!(second.sql.contains(":df_text_2"));
    assert!(first.sql.contains("c.fieldid = 12"));
    assert!(second.sql.contains("c.fieldid = 12"));
    assert_eq!(first.params.get("df_text_1"), Some(&SqlParam::string("%abc%")));
    assert_eq!(second.params.get("df_text_2"), Some(&SqlParam::string("%xyz%")));
    assert_eq!(ctx.issued(), 2);
}

#[test]
fn test_generate_sql_separate_contexts_restart() {
    let field = create_field(&LongTextFixture::new(12, "Body"));

    let a = field.generate_sql(&mut SqlBuildContext::default(), "c", "abc");
    let b = field.generate_sql(&mut SqlBuildContext::default(), "c", "abc");
    assert_eq!(a, b);
}

// ============================================================================
// Emptiness, config, browse
// ============================================================================

#[test]
fn test_empty_values() {
    let field = create_field(&LongTextFixture::new(1, "Title"));

    assert!(field.is_empty_field(&FieldValue::text(""), "field_1"));
    assert!(field.is_empty_field(&FieldValue::Null, "field_1"));
    assert!(field.is_empty_field(&FieldValue::Bool(false), "field_1"));
    assert!(!field.is_empty_field(&FieldValue::text("0"), "field_1"));
    assert!(!field.is_empty_field(&FieldValue::text("   "), "field_1"));
    assert!(!field.is_empty_field(&FieldValue::Integer(0), "field_1"));

    assert!(field.not_empty_field(&FieldValue::text("x"), "field_1"));
    assert!(!field.not_empty_field(&FieldValue::text(""), "field_1"));
}

#[test]
fn test_config_export_has_ten_slots() {
    let field = create_field(&LongTextFixture::new(1, "Title").with_max_length("99"));
    let config = field.config_for_external();

    assert_eq!(config.len(), 10);
    assert_eq!(config.get("param2"), Some(&Some("99".to_string())));
    assert_eq!(config.get("param1"), Some(&None));
    assert_eq!(
        serde_json::to_value(&config).unwrap()["param2"],
        json!("99")
    );
}

#[test]
fn test_browse_after_update() {
    let ctx = TestContext::new();
    let field = create_field(&LongTextFixture::new(2, "Review"));
    let record = RecordId::new(42);

    field
        .update_content(&ctx.store, record, &FieldValue::text("First\nSecond & last"))
        .unwrap();

    let html = field
        .display_browse_field(&ctx.services(), record)
        .unwrap()
        .unwrap();
    assert_eq!(html, "First<br />Second &amp; last");

    let missing = field
        .display_browse_field(&ctx.services(), RecordId::new(43))
        .unwrap();
    assert!(missing.is_none());
}
