//! Markdown serialization (Document → Markdown export)
//!
//! Each top-level node is rendered on its own and the results are joined with a
//! blank line. Rendering is total: every node kind has an output, and kinds that
//! only make sense inline degrade to their plain text at block level.
//!
//! Marks on a text run are applied in a fixed sequence regardless of the order they
//! are stored in: bold, italic, code, strike, link. Each one wraps the result of the
//! previous, starting from the raw string.

use crate::ir::nodes::{plain_text_of, Document, Mark, Node, Text};

const BLOCK_SEPARATOR: &str = "\n\n";
const HARD_BREAK: &str = "  \n";
const LIST_INDENT: &str = "  ";

/// Serialize a document to Markdown
pub fn serialize_to_markdown(doc: &Document) -> String {
    let blocks: Vec<String> = doc
        .content
        .iter()
        .map(|node| render_block(node, 0))
        .collect();
    tracing::debug!(blocks = blocks.len(), "serialized document to markdown");
    blocks.join(BLOCK_SEPARATOR)
}

/// Render one node as Markdown. `depth` is the list nesting level, used for indentation
/// of list items.
pub fn render_block(node: &Node, depth: usize) -> String {
    match node {
        Node::Heading(heading) => format!(
            "{} {}",
            "#".repeat(heading.level as usize),
            plain_text_of(&heading.content)
        ),
        Node::Paragraph(paragraph) => render_inline(&paragraph.content),
        Node::BulletList(list) => list
            .items
            .iter()
            .map(|item| render_block(item, depth))
            .collect::<Vec<_>>()
            .join("\n"),
        Node::OrderedList(list) => list
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| format!("{}. {}", index + 1, item.plain_text()))
            .collect::<Vec<_>>()
            .join("\n"),
        Node::ListItem(item) => {
            let body: String = item
                .content
                .iter()
                .map(|child| match child {
                    Node::Paragraph(paragraph) => render_inline(&paragraph.content),
                    Node::BulletList(_) | Node::OrderedList(_) => {
                        format!("\n{}", render_block(child, depth + 1))
                    }
                    other => render_block(other, depth),
                })
                .collect();
            format!("{}- {}", LIST_INDENT.repeat(depth), body)
        }
        Node::CodeBlock(code_block) => format!(
            "```{}\n{}\n```",
            code_block.language.as_deref().unwrap_or_default(),
            code_block.code
        ),
        Node::Blockquote(quote) => {
            let inner = quote
                .content
                .iter()
                .map(|child| render_block(child, 0))
                .collect::<Vec<_>>()
                .join("\n");
            inner
                .split('\n')
                .map(|line| format!("> {line}"))
                .collect::<Vec<_>>()
                .join("\n")
        }
        Node::HorizontalRule => "---".to_string(),
        Node::HardBreak => HARD_BREAK.to_string(),
        Node::Image(image) => {
            let title = match image.title.as_deref() {
                Some(title) if !title.is_empty() => format!(" \"{title}\""),
                _ => String::new(),
            };
            format!("![{}]({}{})", image.alt, image.src, title)
        }
        Node::Text(text) => text.text.clone(),
    }
}

/// Render a run of inline children, applying marks to text nodes.
pub fn render_inline(children: &[Node]) -> String {
    children
        .iter()
        .map(|child| match child {
            Node::Text(text) if !text.text.is_empty() => apply_marks(text),
            Node::HardBreak => HARD_BREAK.to_string(),
            other => render_block(other, 0),
        })
        .collect()
}

fn apply_marks(text: &Text) -> String {
    let mut marks: Vec<&Mark> = text.marks.iter().collect();
    marks.sort_by_key(|mark| mark.rank());

    marks
        .into_iter()
        .fold(text.text.clone(), |inner, mark| match mark {
            Mark::Bold => format!("**{inner}**"),
            Mark::Italic => format!("*{inner}*"),
            Mark::Code => format!("`{inner}`"),
            Mark::Strike => format!("~~{inner}~~"),
            Mark::Link { href } => format!("[{inner}]({href})"),
        })
}
