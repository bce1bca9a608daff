//! Shared helpers for the integration tests.

use lesson_babel::{Mark, Node};
use std::path::PathBuf;

/// Reads a file from `tests/fixtures`.
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

/// A list item holding a single paragraph.
pub fn item(children: Vec<Node>) -> Node {
    Node::list_item(vec![Node::paragraph(children)])
}

pub fn bold(text: &str) -> Node {
    Node::marked(text, vec![Mark::Bold])
}

pub fn italic(text: &str) -> Node {
    Node::marked(text, vec![Mark::Italic])
}
