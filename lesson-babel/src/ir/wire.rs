//! The JSON shape of rich-text payloads as exchanged with the content store.
//!
//!     { "type": "doc", "content": [
//!         { "type": "heading", "attrs": { "level": 1 }, "content": [{ "type": "text", "text": "..." }] },
//!         { "type": "paragraph", "content": [{ "type": "text", "text": "...", "marks": [{ "type": "bold" }] }] }
//!     ] }
//!
//! Every record is `{type, attrs?, content?, text?, marks?}`. The typed tree in
//! [`super::nodes`] is (de)serialized through [`WireNode`], which is where the lenient
//! decoding rules live: missing attributes fall back to defaults, unknown node kinds
//! collapse to their plain text, unknown marks are dropped.
//!
//! A field holding the wrong JSON type (`"attrs": []`, `"content": {}`, `"text": 5`) is
//! read as absent, and `content`/`marks` entries that are not objects are skipped. One
//! malformed node therefore never takes its siblings down with it. Only the root is
//! checked strictly: it must be a `doc` with a `content` array.

use super::nodes::{
    normalize_level, Blockquote, CodeBlock, Document, Heading, Image, List, ListItem, Mark, Node,
    Paragraph, Text,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const DOC_TYPE: &str = "doc";

/// A node record as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireNode {
    #[serde(rename = "type", default, deserialize_with = "lenient_kind")]
    pub kind: String,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub attrs: Option<Map<String, Value>>,
    #[serde(
        default,
        deserialize_with = "lenient_records",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Vec<WireNode>>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_records",
        skip_serializing_if = "Option::is_none"
    )]
    pub marks: Option<Vec<WireMark>>,
}

/// A mark record as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireMark {
    #[serde(rename = "type", default, deserialize_with = "lenient_kind")]
    pub kind: String,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub attrs: Option<Map<String, Value>>,
}

/// Reads a field through [`Value`], treating `null` or a value of the wrong type as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// An array of records. Entries that are not objects, or fail to decode, are skipped.
fn lenient_records<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(entries) => Ok(Some(
            entries
                .into_iter()
                .filter(Value::is_object)
                .filter_map(|entry| T::deserialize(entry).ok())
                .collect(),
        )),
        other => {
            tracing::debug!(found = %other, "ignoring non-array record list");
            Ok(None)
        }
    }
}

fn lenient_kind<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string).unwrap_or_default())
}

/// Raised when a payload's root is not a document.
#[derive(Debug, Clone, PartialEq)]
pub struct NotADocument {
    pub found: String,
}

impl fmt::Display for NotADocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected a '{DOC_TYPE}' root, found '{}'", self.found)
    }
}

impl WireNode {
    fn new(kind: &str) -> Self {
        WireNode {
            kind: kind.to_string(),
            ..Default::default()
        }
    }

    fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.as_ref().and_then(|attrs| attrs.get(key))
    }

    fn attr_str(&self, key: &str) -> Option<&str> {
        self.attr(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    fn children(&self) -> &[WireNode] {
        self.content.as_deref().unwrap_or(&[])
    }

    fn convert_children(self) -> Vec<Node> {
        self.content
            .unwrap_or_default()
            .into_iter()
            .map(Node::from)
            .collect()
    }

    /// Text payload if non-empty, otherwise the concatenated text of the children.
    pub fn plain_text(&self) -> String {
        match self.text.as_deref() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => self.children().iter().map(WireNode::plain_text).collect(),
        }
    }
}

fn heading_level(value: Option<&Value>) -> u8 {
    let raw = value.and_then(|v| {
        v.as_u64().or_else(|| {
            v.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        })
    });
    normalize_level(raw.unwrap_or(1))
}

impl WireMark {
    /// The typed mark, or `None` for kinds the converter does not support.
    pub fn into_mark(self) -> Option<Mark> {
        match self.kind.as_str() {
            "bold" => Some(Mark::Bold),
            "italic" => Some(Mark::Italic),
            "code" => Some(Mark::Code),
            "strike" => Some(Mark::Strike),
            "link" => {
                let href = self
                    .attrs
                    .as_ref()
                    .and_then(|attrs| attrs.get("href"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                Some(Mark::Link { href })
            }
            other => {
                tracing::trace!(mark = other, "dropping unsupported mark");
                None
            }
        }
    }

    fn named(kind: &str) -> Self {
        WireMark {
            kind: kind.to_string(),
            attrs: None,
        }
    }
}

impl From<WireNode> for Node {
    fn from(mut wire: WireNode) -> Self {
        let kind = std::mem::take(&mut wire.kind);
        match kind.as_str() {
            "heading" => {
                let level = heading_level(wire.attr("level"));
                Node::Heading(Heading {
                    level,
                    content: wire.convert_children(),
                })
            }
            "paragraph" => Node::Paragraph(Paragraph {
                content: wire.convert_children(),
            }),
            "bulletList" => Node::BulletList(List {
                items: wire.convert_children(),
            }),
            "orderedList" => Node::OrderedList(List {
                items: wire.convert_children(),
            }),
            "listItem" => Node::ListItem(ListItem {
                content: wire.convert_children(),
            }),
            "codeBlock" => Node::CodeBlock(CodeBlock {
                language: wire.attr_str("language").map(str::to_string),
                code: wire.children().iter().map(WireNode::plain_text).collect(),
            }),
            "blockquote" => Node::Blockquote(Blockquote {
                content: wire.convert_children(),
            }),
            "horizontalRule" => Node::HorizontalRule,
            "hardBreak" => Node::HardBreak,
            "image" => Node::Image(Image {
                src: wire.attr_str("src").unwrap_or_default().to_string(),
                alt: wire.attr_str("alt").unwrap_or_default().to_string(),
                title: wire.attr_str("title").map(str::to_string),
            }),
            "text" => Node::Text(Text {
                text: wire.text.unwrap_or_default(),
                marks: wire
                    .marks
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(WireMark::into_mark)
                    .collect(),
            }),
            other => {
                tracing::debug!(kind = other, "unknown node kind, keeping its plain text");
                Node::text(wire.plain_text())
            }
        }
    }
}

impl From<Mark> for WireMark {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::Bold => WireMark::named("bold"),
            Mark::Italic => WireMark::named("italic"),
            Mark::Code => WireMark::named("code"),
            Mark::Strike => WireMark::named("strike"),
            Mark::Link { href } => {
                let mut attrs = Map::new();
                attrs.insert("href".to_string(), Value::String(href));
                WireMark {
                    kind: "link".to_string(),
                    attrs: Some(attrs),
                }
            }
        }
    }
}

fn wire_children(nodes: Vec<Node>) -> Option<Vec<WireNode>> {
    Some(nodes.into_iter().map(WireNode::from).collect())
}

impl From<Node> for WireNode {
    fn from(node: Node) -> Self {
        let kind = node.kind();
        match node {
            Node::Heading(heading) => {
                let mut attrs = Map::new();
                attrs.insert("level".to_string(), Value::from(heading.level));
                WireNode {
                    attrs: Some(attrs),
                    content: wire_children(heading.content),
                    ..WireNode::new(kind)
                }
            }
            Node::Paragraph(Paragraph { content })
            | Node::ListItem(ListItem { content })
            | Node::Blockquote(Blockquote { content }) => WireNode {
                content: wire_children(content),
                ..WireNode::new(kind)
            },
            Node::BulletList(list) | Node::OrderedList(list) => WireNode {
                content: wire_children(list.items),
                ..WireNode::new(kind)
            },
            Node::CodeBlock(code_block) => {
                let mut attrs = Map::new();
                if let Some(language) = code_block.language.filter(|l| !l.is_empty()) {
                    attrs.insert("language".to_string(), Value::String(language));
                }
                WireNode {
                    attrs: Some(attrs),
                    content: Some(vec![WireNode {
                        text: Some(code_block.code),
                        ..WireNode::new("text")
                    }]),
                    ..WireNode::new(kind)
                }
            }
            Node::HorizontalRule | Node::HardBreak => WireNode::new(kind),
            Node::Image(image) => {
                let mut attrs = Map::new();
                attrs.insert("src".to_string(), Value::String(image.src));
                attrs.insert("alt".to_string(), Value::String(image.alt));
                if let Some(title) = image.title {
                    attrs.insert("title".to_string(), Value::String(title));
                }
                WireNode {
                    attrs: Some(attrs),
                    ..WireNode::new(kind)
                }
            }
            Node::Text(text) => WireNode {
                text: Some(text.text),
                marks: if text.marks.is_empty() {
                    None
                } else {
                    Some(text.marks.into_iter().map(WireMark::from).collect())
                },
                ..WireNode::new(kind)
            },
        }
    }
}

impl TryFrom<WireNode> for Document {
    type Error = NotADocument;

    fn try_from(wire: WireNode) -> Result<Self, Self::Error> {
        if wire.kind != DOC_TYPE {
            return Err(NotADocument { found: wire.kind });
        }
        match wire.content {
            Some(content) => Ok(Document {
                content: content.into_iter().map(Node::from).collect(),
            }),
            None => Err(NotADocument {
                found: format!("{DOC_TYPE} without content"),
            }),
        }
    }
}

impl From<Document> for WireNode {
    fn from(doc: Document) -> Self {
        WireNode {
            content: wire_children(doc.content),
            ..WireNode::new(DOC_TYPE)
        }
    }
}

impl Document {
    /// Decodes an untyped payload, yielding `None` for anything that is not a
    /// well-formed document root.
    pub fn from_json_value(value: Option<&Value>) -> Option<Document> {
        let value = value?;
        if !value.is_object() {
            return None;
        }
        match Document::deserialize(value) {
            Ok(doc) => Some(doc),
            Err(err) => {
                tracing::debug!(error = %err, "payload is not a rich-text document");
                None
            }
        }
    }

    /// Encodes the document into the wire shape.
    pub fn to_json_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
