//! Rich-text JSON format
//!
//! The payload shape the content store keeps lesson bodies in (see [`crate::ir::wire`]).
//! Parsing is strict about the root: text that is not JSON, or JSON whose root is not a
//! `doc`, is a parse error. Callers that need the soft-fail behavior over untyped values
//! use [`crate::transforms::json_value_to_markdown`] instead.
//!
//! Options accepted by `serialize_with_options`:
//! - `pretty`: `true` (default) for indented output, `false` for a single line.

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::Document;
use std::collections::HashMap;

/// Format implementation for rich-text JSON payloads
#[derive(Debug, Clone)]
pub struct JsonFormat {
    pretty: bool,
}

impl JsonFormat {
    pub fn new(pretty: bool) -> Self {
        JsonFormat { pretty }
    }

    fn render(&self, doc: &Document, pretty: bool) -> Result<String, FormatError> {
        let result = if pretty {
            serde_json::to_string_pretty(doc)
        } else {
            serde_json::to_string(doc)
        };
        result.map_err(|e| FormatError::Serialization(format!("JSON encoding failed: {e}")))
    }
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Rich-text JSON document payload"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        serde_json::from_str(source).map_err(|e| FormatError::Parse(e.to_string()))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        self.render(doc, self.pretty)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut pretty = self.pretty;
        for (key, value) in options {
            match key.as_str() {
                "pretty" => pretty = parse_bool_option(key, value)?,
                _ => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'json' has no option '{key}'"
                    )))
                }
            }
        }
        self.render(doc, pretty)
    }
}

fn parse_bool_option(key: &str, value: &str) -> Result<bool, FormatError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(FormatError::InvalidOption {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
