//! Transform-style helpers over raw payloads
//!
//! Callers usually hold either Markdown text or an untyped JSON value taken straight
//! from a store response. These functions cover the common pipelines without making
//! the caller touch the document tree.

use crate::error::FormatError;
use crate::formats::markdown::{parser, serializer};
use crate::ir::Document;
use crate::registry::FormatRegistry;
use serde_json::Value;

/// Markdown → rich-text JSON payload.
///
/// # Example
///
/// ```
/// use lesson_babel::transforms::markdown_to_json_value;
///
/// let value = markdown_to_json_value("# Hi").unwrap();
/// assert_eq!(value["content"][0]["type"], "heading");
/// ```
pub fn markdown_to_json_value(markdown: &str) -> Result<Value, FormatError> {
    parser::parse_from_markdown(markdown)
        .to_json_value()
        .map_err(|e| FormatError::Serialization(format!("JSON encoding failed: {e}")))
}

/// Rich-text JSON payload → Markdown.
///
/// Never fails: a missing payload, a non-object, a root that is not a `doc` or a
/// malformed content sequence all yield an empty string.
pub fn json_value_to_markdown(value: Option<&Value>) -> String {
    Document::from_json_value(value)
        .map(|doc| serializer::serialize_to_markdown(&doc))
        .unwrap_or_default()
}

/// Re-serialize Markdown through the document tree.
///
/// The output is the canonical spelling of the input (renumbered ordered lists,
/// `-` bullets, `---` rules, joined paragraph lines) and is a fixed point:
/// normalizing it again returns it unchanged.
pub fn normalize_markdown(source: &str) -> String {
    serializer::serialize_to_markdown(&parser::parse_from_markdown(source))
}

/// Convert source text between two registered formats.
pub fn convert(source: &str, from: &str, to: &str) -> Result<String, FormatError> {
    let registry = FormatRegistry::default();
    let doc = registry.parse(source, from)?;
    registry.serialize(&doc, to)
}
