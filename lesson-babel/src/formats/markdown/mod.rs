//! Markdown format implementation
//!
//! This module implements bidirectional conversion between the rich-text document tree
//! and the small Markdown dialect lesson authors write.
//!
//! # Element Mapping Table
//!
//! | Node             | Markdown                 | Export Notes                        | Import Notes                         |
//! |------------------|--------------------------|-------------------------------------|--------------------------------------|
//! | heading          | `#` .. `######`          | Plain text only, marks dropped      | Inline-parsed text                   |
//! | paragraph        | Text lines               | Inline marks rendered               | Consecutive lines joined by a space  |
//! | bulletList       | `- item`                 | Nested lists indented 2 per level   | `-`, `*`, `+`; indentation ignored   |
//! | orderedList      | `1. item`                | Renumbered from 1, plain text       | Numbers discarded                    |
//! | codeBlock        | Fenced (```` ``` ````)   | Language on the opening fence       | Unterminated fence runs to the end   |
//! | blockquote       | `> line`                 | Every rendered line prefixed        | One paragraph per quote run          |
//! | horizontalRule   | `---`                    | Always `---`                        | `---`, `___`, `***` (3 or more)      |
//! | hardBreak        | Two trailing spaces      | `"  \n"`                            | Not recognized                       |
//! | image            | `![alt](src "title")`    | Title optional                      | Read as `!` followed by a link       |
//! | Inline marks:    |                          |                                     |                                      |
//! |   bold           | `**x**`                  | Applied first (innermost)           | Parsed                               |
//! |   italic         | `*x*`                    |                                     | Parsed                               |
//! |   code           | `` `x` ``                |                                     | Parsed, highest priority             |
//! |   strike         | `~~x~~`                  |                                     | Parsed                               |
//! |   link           | `[x](href)`              | Applied last (outermost)            | Parsed                               |
//!
//! # Lossy Conversions
//!
//! - Heading and ordered-list item marks are dropped on export.
//! - Ordered-list start numbers are not preserved.
//! - Nested lists are exported indented but imported flat.
//! - Marks never nest on import: `**[a](b)**` is bold text `[a](b)`.

pub mod inline;
pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::Document;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Lesson Markdown (headings, lists, code fences, quotes, inline marks)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parser::parse_from_markdown(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serializer::serialize_to_markdown(doc))
    }
}
