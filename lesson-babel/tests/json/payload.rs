//! Tests for the rich-text JSON payload shape
//!
//! Covers strict parsing through `JsonFormat`, lenient decoding of half-typed
//! payloads, and the exact shape written back to the store.

use lesson_babel::format::Format;
use lesson_babel::formats::json::JsonFormat;
use lesson_babel::transforms::json_value_to_markdown;
use lesson_babel::{Document, FormatError, FormatRegistry, Mark, Node};
use serde_json::{json, Value};

#[test]
fn test_store_payload_round_trip() {
    let payload = json!({
        "type": "doc",
        "content": [
            { "type": "heading", "attrs": { "level": 2 }, "content": [{ "type": "text", "text": "Goal" }] },
            { "type": "paragraph", "content": [
                { "type": "text", "text": "Read " },
                { "type": "text", "text": "this", "marks": [{ "type": "link", "attrs": { "href": "https://example.com" } }] },
                { "type": "hardBreak" },
                { "type": "text", "text": "then act" }
            ] },
            { "type": "bulletList", "content": [
                { "type": "listItem", "content": [
                    { "type": "paragraph", "content": [{ "type": "text", "text": "one", "marks": [{ "type": "bold" }] }] }
                ] }
            ] },
            { "type": "codeBlock", "attrs": { "language": "sh" }, "content": [{ "type": "text", "text": "ls" }] },
            { "type": "image", "attrs": { "src": "a.png", "alt": "A", "title": "Pic" } },
            { "type": "horizontalRule" }
        ]
    });

    let doc: Document = serde_json::from_value(payload.clone()).unwrap();
    assert_eq!(serde_json::to_value(&doc).unwrap(), payload);
}

#[test]
fn test_code_block_without_language_writes_empty_attrs() {
    let doc = Document::new(vec![Node::code_block(None, "x")]);
    assert_eq!(
        doc.to_json_value().unwrap(),
        json!({
            "type": "doc",
            "content": [{
                "type": "codeBlock",
                "attrs": {},
                "content": [{ "type": "text", "text": "x" }]
            }]
        })
    );
}

#[test]
fn test_lenient_decoding() {
    let value = json!({
        "type": "doc",
        "content": [
            { "type": "heading", "attrs": { "level": 0 }, "content": [{ "type": "text", "text": "Low" }] },
            { "type": "paragraph", "content": [
                { "type": "text", "text": "kept", "marks": [{ "type": "underline" }, { "type": "italic" }] },
                { "type": "emoji", "attrs": { "name": "wave" } }
            ] },
            { "type": "codeBlock", "attrs": { "language": "" }, "content": [
                { "type": "text", "text": "a" },
                { "type": "text", "text": "b" }
            ] }
        ]
    });

    let doc = Document::from_json_value(Some(&value)).unwrap();
    assert_eq!(
        doc,
        Document::new(vec![
            Node::heading(1, vec![Node::text("Low")]),
            Node::paragraph(vec![Node::marked("kept", vec![Mark::Italic]), Node::text("")]),
            Node::code_block(None, "ab"),
        ])
    );
}

#[test]
fn test_wrongly_typed_sibling_does_not_blank_the_document() {
    let ok = json!({ "type": "paragraph", "content": [{ "type": "text", "text": "ok" }] });
    for bad in [
        json!({ "type": "paragraph", "attrs": [] }),
        json!({ "type": "paragraph", "content": {} }),
        json!({ "type": "paragraph", "content": [{ "type": "text", "text": 5 }] }),
    ] {
        let value = json!({ "type": "doc", "content": [ok.clone(), bad.clone()] });
        assert_eq!(json_value_to_markdown(Some(&value)), "ok\n\n", "{bad}");
    }

    let value = json!({ "type": "doc", "content": [ok, 42, { "type": "heading", "attrs": { "level": "x" }, "content": [{ "type": "text", "text": "T" }] }] });
    assert_eq!(json_value_to_markdown(Some(&value)), "ok\n\n# T");
}

#[test]
fn test_malformed_root_still_yields_empty_markdown() {
    for value in [
        json!({ "type": "doc", "content": {} }),
        json!({ "type": "doc", "content": "text" }),
        json!({ "type": 1, "content": [] }),
    ] {
        assert_eq!(json_value_to_markdown(Some(&value)), "", "{value}");
    }
}

#[test]
fn test_non_documents_are_rejected() {
    for value in [
        Value::Null,
        json!("doc"),
        json!({ "type": "paragraph", "content": [] }),
        json!({ "type": "doc" }),
    ] {
        assert_eq!(Document::from_json_value(Some(&value)), None, "{value}");
    }
    assert_eq!(Document::from_json_value(None), None);
}

#[test]
fn test_json_format_parse_errors() {
    let format = JsonFormat::default();
    assert!(matches!(format.parse("{"), Err(FormatError::Parse(_))));
    assert!(matches!(
        format.parse(r#"{"type":"section","content":[]}"#),
        Err(FormatError::Parse(_))
    ));
}

#[test]
fn test_registry_detects_formats_from_filenames() {
    let registry = FormatRegistry::default();
    assert_eq!(
        registry.detect_format_from_filename("lesson.json"),
        Some("json".to_string())
    );
    assert_eq!(
        registry.detect_format_from_filename("notes/week1.md"),
        Some("markdown".to_string())
    );
    assert_eq!(registry.detect_format_from_filename("slides.pptx"), None);
}

#[test]
fn test_markdown_to_json_through_registry() {
    let registry = FormatRegistry::default();
    let doc = registry.parse("Hi", "markdown").unwrap();
    let mut options = std::collections::HashMap::new();
    options.insert("pretty".to_string(), "false".to_string());
    assert_eq!(
        registry.serialize_with_options(&doc, "json", &options).unwrap(),
        r#"{"type":"doc","content":[{"type":"paragraph","content":[{"type":"text","text":"Hi"}]}]}"#
    );
}
