//! Lesson records as exchanged with the content store
//!
//! A lesson carries its body as a rich-text JSON payload (`contentJson`). Authors edit
//! that body as Markdown, so this module renders a record into an editing view and
//! builds update payloads back from Markdown. A whole module can also be rendered as a
//! numbered overview. Fetching and storing records is the caller's business.

use crate::error::FormatError;
use crate::transforms::{json_value_to_markdown, markdown_to_json_value};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_EMPTY_CONTENT_PLACEHOLDER: &str = "*No content*";

/// A lesson together with the learning target it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content_json: Option<Value>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub live: Option<bool>,
    #[serde(default)]
    pub slt_index: u32,
    #[serde(default)]
    pub slt_text: String,
}

impl Lesson {
    /// The lesson body as Markdown, empty when there is no usable payload.
    pub fn content_markdown(&self) -> String {
        json_value_to_markdown(self.content_json.as_ref())
    }

    pub fn is_live(&self) -> bool {
        self.live.unwrap_or(false)
    }
}

/// Knobs for [`render_lesson`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Shown in place of the body when the lesson has no content.
    pub empty_content_placeholder: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            empty_content_placeholder: DEFAULT_EMPTY_CONTENT_PLACEHOLDER.to_string(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Render a lesson record as a Markdown editing view: metadata first, then the body.
pub fn render_lesson(lesson: &Lesson, options: &RenderOptions) -> String {
    let mut blocks = vec![
        format!(
            "# Lesson: {}",
            non_empty(&lesson.title).unwrap_or("Untitled")
        ),
        format!("**SLT**: {}", lesson.slt_text),
        format!(
            "**Description**: {}",
            non_empty(&lesson.description).unwrap_or("No description")
        ),
    ];

    if let Some(url) = non_empty(&lesson.image_url) {
        blocks.push(format!("**Image URL**: {url}"));
    }
    if let Some(url) = non_empty(&lesson.video_url) {
        blocks.push(format!("**Video URL**: {url}"));
    }

    let status = if lesson.is_live() { "Live" } else { "Draft" };
    blocks.push(format!("**Status**: {status}"));
    blocks.push("---".to_string());
    blocks.push("## Lesson Content (Markdown)".to_string());

    let body = lesson.content_markdown();
    if body.is_empty() {
        blocks.push(options.empty_content_placeholder.clone());
    } else {
        blocks.push(body);
    }

    blocks.join("\n\n")
}

/// Render the lessons of one module as a Markdown overview, numbered in the order given.
pub fn render_lesson_list(module_code: &str, lessons: &[Lesson]) -> String {
    let mut out = format!(
        "# Module Lessons: {module_code}\n\nFound {} lesson(s)\n\n---\n\n",
        lessons.len()
    );
    for (index, lesson) in lessons.iter().enumerate() {
        out.push_str(&format!(
            "## {}. {}\n\n",
            index + 1,
            non_empty(&lesson.title).unwrap_or("Untitled")
        ));
        out.push_str(&format!("- **SLT Index**: {}\n", lesson.slt_index));
        out.push_str(&format!("- **SLT**: {}\n", lesson.slt_text));
        let status = if lesson.is_live() { "Live" } else { "Draft" };
        out.push_str(&format!("- **Status**: {status}\n"));
        if let Some(description) = non_empty(&lesson.description) {
            out.push_str(&format!("- **Description**: {description}\n"));
        }
        out.push('\n');
    }
    out
}

/// A partial lesson update. Fields left as `None` are omitted from the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_json: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<bool>,
}

impl LessonUpdate {
    /// Set the body from Markdown. Empty Markdown leaves the body untouched.
    pub fn with_markdown(mut self, markdown: &str) -> Result<Self, FormatError> {
        if !markdown.is_empty() {
            self.content_json = Some(markdown_to_json_value(markdown)?);
        }
        Ok(self)
    }
}
