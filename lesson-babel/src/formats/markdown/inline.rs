//! Inline Markdown scanning
//!
//! Turns the text of a single block into a run of text nodes. At each position the
//! rules below are tried in order and the first one matching *at that position* wins;
//! when none match, one character is taken literally.
//!
//! | Priority | Syntax          | Result                    |
//! |----------|-----------------|---------------------------|
//! | 1        | `` `code` ``    | text with `code` mark     |
//! | 2        | `**bold**`      | text with `bold` mark     |
//! | 3        | `*italic*`      | text with `italic` mark   |
//! | 4        | `~~strike~~`    | text with `strike` mark   |
//! | 5        | `[label](href)` | label with `link` mark    |
//!
//! Delimited spans never contain their own delimiter character, so `**a*b**` is not bold.
//! Consecutive literal characters are coalesced into a single unmarked text node.

use crate::ir::nodes::{Mark, Node};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static CODE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^`([^`]+)`").unwrap());
static BOLD_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*\*([^*]+)\*\*").unwrap());
static ITALIC_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*([^*]+)\*").unwrap());
static STRIKE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^~~([^~]+)~~").unwrap());
static LINK_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[([^\]]+)\]\(([^)]+)\)").unwrap());

type MarkBuilder = fn(&Captures) -> Mark;

/// Span rules in priority order.
static SPAN_RULES: [(&Lazy<Regex>, MarkBuilder); 5] = [
    (&CODE_SPAN, code_mark),
    (&BOLD_SPAN, bold_mark),
    (&ITALIC_SPAN, italic_mark),
    (&STRIKE_SPAN, strike_mark),
    (&LINK_SPAN, link_mark),
];

fn code_mark(_: &Captures) -> Mark {
    Mark::Code
}

fn bold_mark(_: &Captures) -> Mark {
    Mark::Bold
}

fn italic_mark(_: &Captures) -> Mark {
    Mark::Italic
}

fn strike_mark(_: &Captures) -> Mark {
    Mark::Strike
}

fn link_mark(caps: &Captures) -> Mark {
    Mark::link(&caps[2])
}

/// Parse inline Markdown into text nodes.
pub fn parse_inline(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        if let Some((node, consumed)) = match_span(rest) {
            nodes.push(node);
            pos += consumed;
            continue;
        }

        let width = rest.chars().next().map_or(1, char::len_utf8);
        push_literal(&mut nodes, &rest[..width]);
        pos += width;
    }

    nodes
}

fn match_span(rest: &str) -> Option<(Node, usize)> {
    SPAN_RULES.iter().find_map(|(pattern, build)| {
        let caps = pattern.captures(rest)?;
        let consumed = caps.get(0)?.end();
        let node = Node::marked(&caps[1], vec![build(&caps)]);
        Some((node, consumed))
    })
}

/// Appends literal text, extending the previous node when it is also unmarked.
fn push_literal(nodes: &mut Vec<Node>, literal: &str) {
    if let Some(Node::Text(run)) = nodes.last_mut() {
        if run.is_plain() {
            run.text.push_str(literal);
            return;
        }
    }
    nodes.push(Node::text(literal));
}
