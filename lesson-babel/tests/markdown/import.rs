//! Import tests for Markdown format (Markdown → Document)
//!
//! These tests run whole Markdown sources through `MarkdownFormat::parse` and check
//! the resulting tree, or its JSON payload where the wire shape is what matters.

use crate::common::{bold, fixture, italic, item};
use lesson_babel::format::Format;
use lesson_babel::formats::markdown::MarkdownFormat;
use lesson_babel::transforms::markdown_to_json_value;
use lesson_babel::{Mark, Node};
use serde_json::json;

fn parse(source: &str) -> Vec<Node> {
    MarkdownFormat.parse(source).unwrap().content
}

#[test]
fn test_heading_and_paragraph_payload() {
    let value = markdown_to_json_value("# Hello\n\nWorld").unwrap();
    assert_eq!(
        value,
        json!({
            "type": "doc",
            "content": [
                {
                    "type": "heading",
                    "attrs": { "level": 1 },
                    "content": [{ "type": "text", "text": "Hello" }]
                },
                {
                    "type": "paragraph",
                    "content": [{ "type": "text", "text": "World" }]
                }
            ]
        })
    );
}

#[test]
fn test_bullet_list_with_bold_item() {
    assert_eq!(
        parse("- a\n- **b**"),
        vec![Node::bullet_list(vec![
            item(vec![Node::text("a")]),
            item(vec![bold("b")]),
        ])]
    );
}

#[test]
fn test_unterminated_fence_payload() {
    let value = markdown_to_json_value("```js\nlet x;").unwrap();
    assert_eq!(
        value,
        json!({
            "type": "doc",
            "content": [{
                "type": "codeBlock",
                "attrs": { "language": "js" },
                "content": [{ "type": "text", "text": "let x;" }]
            }]
        })
    );
}

#[test]
fn test_empty_source_gives_empty_content() {
    assert_eq!(
        markdown_to_json_value("").unwrap(),
        json!({ "type": "doc", "content": [] })
    );
}

#[test]
fn test_inline_marks_in_paragraph() {
    assert_eq!(
        parse("Use `git` to **track** *every* ~~guess~~ [change](https://git-scm.com)."),
        vec![Node::paragraph(vec![
            Node::text("Use "),
            Node::marked("git", vec![Mark::Code]),
            Node::text(" to "),
            bold("track"),
            Node::text(" "),
            italic("every"),
            Node::text(" "),
            Node::marked("guess", vec![Mark::Strike]),
            Node::text(" "),
            Node::marked("change", vec![Mark::link("https://git-scm.com")]),
            Node::text("."),
        ])]
    );
}

#[test]
fn test_code_span_wins_over_bold() {
    assert_eq!(
        parse("`**not bold**`"),
        vec![Node::paragraph(vec![Node::marked(
            "**not bold**",
            vec![Mark::Code]
        )])]
    );
}

#[test]
fn test_marks_do_not_nest() {
    assert_eq!(
        parse("**[a](b)**"),
        vec![Node::paragraph(vec![bold("[a](b)")])]
    );
}

#[test]
fn test_unclosed_delimiters_are_literal() {
    assert_eq!(
        parse("**half and `open"),
        vec![Node::paragraph(vec![Node::text("**half and `open")])]
    );
}

#[test]
fn test_list_indentation_is_flattened() {
    assert_eq!(
        parse("- outer\n  - inner"),
        vec![Node::bullet_list(vec![
            item(vec![Node::text("outer")]),
            item(vec![Node::text("inner")]),
        ])]
    );
}

#[test]
fn test_blank_line_splits_lists() {
    let nodes = parse("1. one\n\n1. two");
    assert_eq!(
        nodes,
        vec![
            Node::ordered_list(vec![item(vec![Node::text("one")])]),
            Node::ordered_list(vec![item(vec![Node::text("two")])]),
        ]
    );
}

#[test]
fn test_image_syntax_reads_as_bang_and_link() {
    assert_eq!(
        parse("![alt](pic.png)"),
        vec![Node::paragraph(vec![
            Node::text("!"),
            Node::marked("alt", vec![Mark::link("pic.png")]),
        ])]
    );
}

#[test]
fn test_kitchensink_structure() {
    let nodes = parse(&fixture("kitchensink.md"));
    let kinds: Vec<&str> = nodes.iter().map(Node::kind).collect();
    assert_eq!(
        kinds,
        vec![
            "heading",
            "paragraph",
            "heading",
            "bulletList",
            "orderedList",
            "codeBlock",
            "blockquote",
            "horizontalRule",
            "paragraph",
            "paragraph",
        ]
    );

    match &nodes[5] {
        Node::CodeBlock(code) => {
            assert_eq!(code.language.as_deref(), Some("bash"));
            assert_eq!(
                code.code,
                "git checkout -b feature/lesson\ngit push origin feature/lesson"
            );
        }
        other => panic!("Expected code block, found {other:?}"),
    }
}
