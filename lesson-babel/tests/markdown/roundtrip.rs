//! Round-trip tests for Markdown format
//!
//! Markdown → Document → Markdown must reproduce canonical Markdown exactly, and
//! Document → Markdown → Document must preserve every construct the dialect can carry.

use crate::common::{bold, fixture, italic, item};
use lesson_babel::transforms::normalize_markdown;
use lesson_babel::{to_document, to_markdown, Document, Mark, Node};
use rstest::rstest;

#[rstest]
#[case::heading("# Hello\n\nWorld")]
#[case::deep_heading("###### Fine print")]
#[case::marks("**bold** and *italic*")]
#[case::every_mark("**b** *i* `c` ~~s~~ [l](https://example.com)")]
#[case::code_block("```ts\nconst x = 1;\n```")]
#[case::code_block_without_language("```\nplain\n```")]
#[case::blockquote("> Quoted *words*")]
#[case::bullet_list("- one\n- two")]
#[case::ordered_list("1. first\n2. second")]
#[case::rule("---")]
#[case::image("![Diagram](https://example.com/d.png)")]
fn test_canonical_markdown_is_stable(#[case] source: &str) {
    assert_eq!(to_markdown(&to_document(source)), source);
}

#[rstest]
#[case::renumbered("5. first\n9. second", "1. first\n2. second")]
#[case::star_bullets("* one\n+ two", "- one\n- two")]
#[case::underscore_rule("___", "---")]
#[case::joined_lines("one\ntwo\nthree", "one two three")]
#[case::joined_quote("> one\n> two", "> one two")]
#[case::blank_runs("# A\n\n\n\nB", "# A\n\nB")]
#[case::crlf("# A\r\n\r\nB\r\n", "# A\n\nB")]
#[case::bare_heading_marker("# \nnext", "# \n\nnext")]
#[case::bare_heading_marker_tab("#\t\nnext", "#\t\n\nnext")]
#[case::bare_marker_after_text("intro\n## \nmore", "intro\n\n## \n\nmore")]
#[case::lone_hash("#\nnext", "#\n\nnext")]
#[case::lone_dash("-\nitem", "-\n\nitem")]
#[case::lone_number("3.\nstep", "3.\n\nstep")]
fn test_non_canonical_markdown_is_normalized(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(normalize_markdown(source), expected);
    assert_eq!(normalize_markdown(expected), expected);
}

#[rstest]
#[case::paragraph(Node::paragraph(vec![bold("bold"), Node::text(" and "), italic("italic")]))]
#[case::heading(Node::heading(3, vec![Node::text("Plain title")]))]
#[case::bullets(Node::bullet_list(vec![
    item(vec![Node::text("a")]),
    item(vec![Node::marked("b", vec![Mark::Code])]),
]))]
#[case::ordered(Node::ordered_list(vec![item(vec![Node::text("x")]), item(vec![Node::text("y")])]))]
#[case::code(Node::code_block(Some("rust"), "fn main() {}\n\n// done"))]
#[case::quote(Node::blockquote(vec![Node::paragraph(vec![
    Node::text("see "),
    Node::marked("docs", vec![Mark::link("https://docs.rs")]),
])]))]
#[case::rule(Node::HorizontalRule)]
fn test_document_survives_markdown(#[case] node: Node) {
    let doc = Document::new(vec![node]);
    assert_eq!(to_document(&to_markdown(&doc)), doc);
}

#[test]
fn test_mixed_document_survives_markdown() {
    let doc = Document::new(vec![
        Node::heading(1, vec![Node::text("Title")]),
        Node::paragraph(vec![Node::text("Intro "), bold("text")]),
        Node::HorizontalRule,
        Node::bullet_list(vec![item(vec![Node::text("point")])]),
        Node::code_block(None, "echo hi"),
    ]);
    assert_eq!(to_document(&to_markdown(&doc)), doc);
}

#[test]
fn test_heading_marks_are_lost() {
    let doc = Document::new(vec![Node::heading(2, vec![bold("Loud")])]);
    assert_eq!(
        to_document(&to_markdown(&doc)),
        Document::new(vec![Node::heading(2, vec![Node::text("Loud")])])
    );
}

#[test]
fn test_nested_list_comes_back_flat() {
    let doc = Document::new(vec![Node::bullet_list(vec![Node::list_item(vec![
        Node::paragraph(vec![Node::text("outer")]),
        Node::bullet_list(vec![item(vec![Node::text("inner")])]),
    ])])]);
    let md = to_markdown(&doc);
    assert_eq!(md, "- outer\n  - inner");
    assert_eq!(
        to_document(&md),
        Document::new(vec![Node::bullet_list(vec![
            item(vec![Node::text("outer")]),
            item(vec![Node::text("inner")]),
        ])])
    );
}

#[test]
fn test_kitchensink_is_a_fixed_point() {
    let source = fixture("kitchensink.md");
    let source = source.trim_end();
    assert_eq!(normalize_markdown(source), source);
}
