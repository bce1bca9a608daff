//! Markdown parsing (Markdown → Document import)
//!
//! A single forward scan over the input lines. At each position the block rules
//! are tried in a fixed order; a match consumes one or more lines and emits exactly
//! one top-level node:
//!
//! 1. blank line (skipped, emits nothing)
//! 2. ATX heading, 1 to 6 `#`
//! 3. thematic break: `---`, `___`, `***` (3 or more, nothing else on the line)
//! 4. fenced code block (an unterminated fence runs to the end of input)
//! 5. blockquote: consecutive `> ` lines, joined into one paragraph
//! 6. bullet list: consecutive `-`, `*`, `+` item lines
//! 7. ordered list: consecutive `N.` item lines, numbers discarded
//! 8. paragraph: consecutive lines that start none of the above, joined with spaces
//!
//! Parsing never fails: anything unrecognized is paragraph text. List indentation is
//! stripped and never turned into nesting, even though the serializer can emit nested
//! lists.

use super::inline::parse_inline;
use crate::ir::nodes::{Document, Node};
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());
static HEADING_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}\s+").unwrap());
static THEMATIC_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-{3,}|_{3,}|\*{3,})$").unwrap());
static BULLET_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*+]\s+").unwrap());
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[0-9]+\.\s+").unwrap());

const FENCE: &str = "```";
const QUOTE_PREFIX: &str = "> ";

/// Parse a Markdown string into a document
pub fn parse_from_markdown(source: &str) -> Document {
    let lines: Vec<&str> = source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let mut content = Vec::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        let line = lines[cursor];

        if line.trim().is_empty() {
            cursor += 1;
            continue;
        }

        let (node, consumed) = if let Some(heading) = parse_heading(line) {
            (heading, 1)
        } else if THEMATIC_BREAK.is_match(line) {
            (Node::HorizontalRule, 1)
        } else if line.starts_with(FENCE) {
            parse_code_block(&lines[cursor..])
        } else if line.starts_with(QUOTE_PREFIX) {
            parse_blockquote(&lines[cursor..])
        } else if BULLET_ITEM.is_match(line) {
            let (items, consumed) = parse_list_items(&lines[cursor..], &BULLET_ITEM);
            (Node::bullet_list(items), consumed)
        } else if ORDERED_ITEM.is_match(line) {
            let (items, consumed) = parse_list_items(&lines[cursor..], &ORDERED_ITEM);
            (Node::ordered_list(items), consumed)
        } else {
            parse_paragraph(&lines[cursor..])
        };

        content.push(node);
        cursor += consumed;
    }

    tracing::debug!(
        lines = lines.len(),
        blocks = content.len(),
        "parsed markdown"
    );

    Document::new(content)
}

/// Whether a line would start a block other than a paragraph.
pub fn is_special_line(line: &str) -> bool {
    HEADING_START.is_match(line)
        || BULLET_ITEM.is_match(line)
        || ORDERED_ITEM.is_match(line)
        || line.starts_with(FENCE)
        || line.starts_with(QUOTE_PREFIX)
        || THEMATIC_BREAK.is_match(line)
}

fn parse_heading(line: &str) -> Option<Node> {
    let caps = HEADING.captures(line)?;
    let level = caps[1].len() as u8;
    Some(Node::heading(level, parse_inline(&caps[2])))
}

/// `lines[0]` is the opening fence. Returns the block and the number of lines consumed,
/// closing fence included when there is one.
fn parse_code_block(lines: &[&str]) -> (Node, usize) {
    let language = lines[0][FENCE.len()..].trim();
    let body: Vec<&str> = lines[1..]
        .iter()
        .take_while(|line| !line.starts_with(FENCE))
        .copied()
        .collect();

    let closed = 1 + body.len() < lines.len();
    if !closed {
        tracing::debug!(lines = body.len(), "unterminated code fence runs to end of input");
    }

    let language = (!language.is_empty()).then_some(language);
    let node = Node::code_block(language, body.join("\n"));
    (node, 1 + body.len() + usize::from(closed))
}

fn parse_blockquote(lines: &[&str]) -> (Node, usize) {
    let quoted: Vec<&str> = lines
        .iter()
        .map_while(|line| line.strip_prefix(QUOTE_PREFIX))
        .collect();
    let paragraph = Node::paragraph(parse_inline(&quoted.join(" ")));
    (Node::blockquote(vec![paragraph]), quoted.len())
}

fn parse_list_items(lines: &[&str], marker: &Regex) -> (Vec<Node>, usize) {
    let items: Vec<Node> = lines
        .iter()
        .map_while(|line| marker.find(line).map(|m| &line[m.end()..]))
        .map(|text| Node::list_item(vec![Node::paragraph(parse_inline(text))]))
        .collect();
    let consumed = items.len();
    (items, consumed)
}

/// The first line always belongs to the paragraph, so the scan makes progress even on
/// lines like `"# "` that look like a block start but match no block rule. When joining
/// would itself produce a block start (`"#"` + `"next"` is `"# next"`), the first line
/// stands alone and the rest is left for the next block.
fn parse_paragraph(lines: &[&str]) -> (Node, usize) {
    let continuation = lines[1..]
        .iter()
        .take_while(|line| !line.trim().is_empty() && !is_special_line(line))
        .count();
    let joined = lines[..=continuation].join(" ");

    let (text, consumed) = if continuation > 0 && is_special_line(&joined) {
        (lines[0].to_string(), 1)
    } else {
        (joined, 1 + continuation)
    };
    (Node::paragraph(parse_inline(&text)), consumed)
}
