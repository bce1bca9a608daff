//! Core data structures for the rich-text document tree.
//!
//! The tree is a plain value: parents own their children, nothing is shared and
//! nothing is mutated after construction. Both converters build a fresh tree per call.

use serde::{Deserialize, Serialize};

/// The root of a rich-text document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "super::wire::WireNode", into = "super::wire::WireNode")]
pub struct Document {
    pub content: Vec<Node>,
}

impl Document {
    pub fn new(content: Vec<Node>) -> Self {
        Document { content }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// One element of the document tree, block or inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "super::wire::WireNode", into = "super::wire::WireNode")]
pub enum Node {
    Heading(Heading),
    Paragraph(Paragraph),
    BulletList(List),
    OrderedList(List),
    ListItem(ListItem),
    CodeBlock(CodeBlock),
    Blockquote(Blockquote),
    HorizontalRule,
    HardBreak,
    Image(Image),
    Text(Text),
}

/// A heading. `level` is always within 1..=6.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub level: u8,
    pub content: Vec<Node>,
}

impl Heading {
    /// Builds a heading, replacing an out-of-range level with 1.
    pub fn new(level: u8, content: Vec<Node>) -> Self {
        Heading {
            level: normalize_level(level as u64),
            content,
        }
    }
}

/// Clamps a raw heading level to the supported range. Anything outside 1..=6 becomes 1.
pub fn normalize_level(level: u64) -> u8 {
    if (1..=6).contains(&level) {
        level as u8
    } else {
        1
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub content: Vec<Node>,
}

/// Shared payload of bullet and ordered lists. Items are normally `ListItem` nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct List {
    pub items: Vec<Node>,
}

/// A list item: one paragraph, optionally followed by a nested list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListItem {
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Blockquote {
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    pub src: String,
    pub alt: String,
    pub title: Option<String>,
}

/// A run of literal text with the marks applied to all of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    pub text: String,
    pub marks: Vec<Mark>,
}

impl Text {
    pub fn is_plain(&self) -> bool {
        self.marks.is_empty()
    }
}

/// A formatting annotation on a text run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mark {
    Bold,
    Italic,
    Code,
    Strike,
    Link { href: String },
}

impl Mark {
    /// Position of this mark in the serializer's wrap sequence.
    pub fn rank(&self) -> u8 {
        match self {
            Mark::Bold => 0,
            Mark::Italic => 1,
            Mark::Code => 2,
            Mark::Strike => 3,
            Mark::Link { .. } => 4,
        }
    }

    pub fn link(href: impl Into<String>) -> Self {
        Mark::Link { href: href.into() }
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(Text {
            text: text.into(),
            marks: Vec::new(),
        })
    }

    pub fn marked(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Node::Text(Text {
            text: text.into(),
            marks,
        })
    }

    pub fn paragraph(content: Vec<Node>) -> Self {
        Node::Paragraph(Paragraph { content })
    }

    pub fn heading(level: u8, content: Vec<Node>) -> Self {
        Node::Heading(Heading::new(level, content))
    }

    pub fn bullet_list(items: Vec<Node>) -> Self {
        Node::BulletList(List { items })
    }

    pub fn ordered_list(items: Vec<Node>) -> Self {
        Node::OrderedList(List { items })
    }

    pub fn list_item(content: Vec<Node>) -> Self {
        Node::ListItem(ListItem { content })
    }

    pub fn code_block(language: Option<&str>, code: impl Into<String>) -> Self {
        Node::CodeBlock(CodeBlock {
            language: language.map(str::to_string),
            code: code.into(),
        })
    }

    pub fn blockquote(content: Vec<Node>) -> Self {
        Node::Blockquote(Blockquote { content })
    }

    pub fn image(src: impl Into<String>, alt: impl Into<String>, title: Option<&str>) -> Self {
        Node::Image(Image {
            src: src.into(),
            alt: alt.into(),
            title: title.map(str::to_string),
        })
    }

    /// The wire name of this node kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Heading(_) => "heading",
            Node::Paragraph(_) => "paragraph",
            Node::BulletList(_) => "bulletList",
            Node::OrderedList(_) => "orderedList",
            Node::ListItem(_) => "listItem",
            Node::CodeBlock(_) => "codeBlock",
            Node::Blockquote(_) => "blockquote",
            Node::HorizontalRule => "horizontalRule",
            Node::HardBreak => "hardBreak",
            Node::Image(_) => "image",
            Node::Text(_) => "text",
        }
    }

    /// Child nodes, empty for leaves. Code blocks hold their body as a string, not children.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Heading(h) => &h.content,
            Node::Paragraph(p) => &p.content,
            Node::BulletList(l) | Node::OrderedList(l) => &l.items,
            Node::ListItem(i) => &i.content,
            Node::Blockquote(q) => &q.content,
            Node::CodeBlock(_)
            | Node::HorizontalRule
            | Node::HardBreak
            | Node::Image(_)
            | Node::Text(_) => &[],
        }
    }

    /// Text content with all marks ignored.
    pub fn plain_text(&self) -> String {
        match self {
            Node::Text(t) => t.text.clone(),
            Node::CodeBlock(c) => c.code.clone(),
            other => plain_text_of(other.children()),
        }
    }
}

/// Concatenated plain text of a node sequence.
pub fn plain_text_of(nodes: &[Node]) -> String {
    nodes.iter().map(Node::plain_text).collect()
}
