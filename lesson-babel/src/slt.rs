//! Student Learning Targets
//!
//! Every lesson teaches one learning target, phrased as a demonstrable capability:
//! "I can explain what a UTXO is". This module checks that phrasing and picks the
//! lesson template that best fits a target. Both are keyword heuristics over fixed
//! tables; neither ever fails.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

const REQUIRED_PREFIX: &str = "i can";
const MIN_LENGTH: usize = 15;

/// Verbs that describe a learning objective rather than something a learner can show.
static VAGUE_VERBS: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        Regex::new(r"(?i)\bunderstand\b").unwrap(),
        Regex::new(r"(?i)\blearn\b").unwrap(),
        Regex::new(r"(?i)\bknow about\b").unwrap(),
        Regex::new(r"(?i)\bbe familiar with\b").unwrap(),
    ]
});

/// Outcome of [`validate_slt`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SltValidation {
    pub valid: bool,
    pub message: String,
    pub suggestions: Vec<String>,
}

impl SltValidation {
    fn valid() -> Self {
        SltValidation {
            valid: true,
            message: "Valid SLT format".to_string(),
            suggestions: Vec::new(),
        }
    }

    fn invalid(message: &str, suggestions: Vec<String>) -> Self {
        SltValidation {
            valid: false,
            message: message.to_string(),
            suggestions,
        }
    }

    /// Markdown report, suggestions listed only when there are any.
    pub fn render(&self) -> String {
        let status = if self.valid { "Valid" } else { "Invalid" };
        let mut out = format!(
            "**Validation Result**\n\nStatus: {status}\n\nMessage: {}\n",
            self.message
        );
        if !self.suggestions.is_empty() {
            out.push_str("\n**Suggestions:**\n");
            for suggestion in &self.suggestions {
                out.push_str(&format!("- {suggestion}\n"));
            }
        }
        out
    }
}

/// Check a learning target. Rules apply in order and the first failure is reported:
/// the "I can" prefix, a minimum length, then the vague-verb list.
pub fn validate_slt(slt: &str) -> SltValidation {
    let trimmed = slt.trim();
    let lowered = trimmed.to_lowercase();

    if !lowered.starts_with(REQUIRED_PREFIX) {
        return SltValidation::invalid(
            "SLT must start with 'I can...'",
            vec![
                format!("I can {lowered}"),
                "Consider rephrasing as: \"I can [specific capability]\"".to_string(),
            ],
        );
    }

    if trimmed.chars().count() < MIN_LENGTH {
        return SltValidation::invalid(
            "SLT is too vague. Be specific about the capability.",
            vec![
                "Add details about what the learner can actually do".to_string(),
                "Example: 'I can create a new Module in the Andamio Platform'".to_string(),
            ],
        );
    }

    if let Some(verb) = VAGUE_VERBS.iter().find(|verb| verb.is_match(trimmed)) {
        tracing::debug!(pattern = verb.as_str(), "learning target uses a vague verb");
        return SltValidation::invalid(
            "Avoid vague verbs like 'understand', 'learn', 'know about'. Focus on demonstrable capabilities.",
            vec![
                "Replace with action verbs: create, explain, trace, identify, build, implement"
                    .to_string(),
                "Example: Instead of 'I can understand UTXOs', use 'I can explain what a UTXO is'"
                    .to_string(),
            ],
        );
    }

    SltValidation::valid()
}

/// Lesson templates a learning target can be taught with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LessonType {
    ProductDemo,
    DeveloperDocs,
    HowToGuide,
    OrgOnboarding,
}

impl LessonType {
    pub fn as_str(self) -> &'static str {
        match self {
            LessonType::ProductDemo => "product-demo",
            LessonType::DeveloperDocs => "developer-docs",
            LessonType::HowToGuide => "how-to-guide",
            LessonType::OrgOnboarding => "org-onboarding",
        }
    }
}

impl fmt::Display for LessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternative {
    pub lesson_type: LessonType,
    pub reason: &'static str,
}

/// Outcome of [`suggest_lesson_type`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonTypeSuggestion {
    pub recommended: LessonType,
    pub rationale: &'static str,
    pub alternatives: Vec<Alternative>,
}

impl LessonTypeSuggestion {
    pub fn render(&self) -> String {
        let mut out = format!(
            "**Lesson Type Recommendation**\n\nRecommended Type: **{}**\n\nRationale: {}\n",
            self.recommended, self.rationale
        );
        if !self.alternatives.is_empty() {
            out.push_str("\n**Alternative Options:**\n");
            for alt in &self.alternatives {
                out.push_str(&format!("- **{}**: {}\n", alt.lesson_type, alt.reason));
            }
        }
        out
    }
}

struct TypeRule {
    lesson_type: LessonType,
    keywords: &'static [&'static str],
    rationale: &'static str,
    alternatives: &'static [(LessonType, &'static str)],
}

/// Tried in order; the first rule with a keyword in the lowercased target wins.
const TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        lesson_type: LessonType::ProductDemo,
        keywords: &["platform", "andamio", "create a", "navigate", "use the"],
        rationale: "SLT appears to involve using Andamio Platform features",
        alternatives: &[(
            LessonType::HowToGuide,
            "If this is a multi-step procedure, consider a how-to guide",
        )],
    },
    TypeRule {
        lesson_type: LessonType::DeveloperDocs,
        keywords: &["api", "integrate", "implement", "code", "function", "transaction"],
        rationale: "SLT appears to involve technical implementation",
        alternatives: &[(
            LessonType::HowToGuide,
            "If this is procedural rather than technical, use a how-to guide",
        )],
    },
    TypeRule {
        lesson_type: LessonType::OrgOnboarding,
        keywords: &["organization", "getting started", "set up", "configure"],
        rationale: "SLT appears to involve organizational setup or getting started",
        alternatives: &[],
    },
];

const FALLBACK_RULE: TypeRule = TypeRule {
    lesson_type: LessonType::HowToGuide,
    keywords: &[],
    rationale: "General procedural content - how-to guide is most appropriate",
    alternatives: &[(
        LessonType::ProductDemo,
        "If this specifically involves Andamio Platform features",
    )],
};

/// Recommend a lesson template by keyword. Matching is substring based, so `"api"`
/// also fires inside longer words.
pub fn suggest_lesson_type(slt: &str) -> LessonTypeSuggestion {
    let lowered = slt.to_lowercase();
    let rule = TYPE_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| lowered.contains(kw)))
        .unwrap_or(&FALLBACK_RULE);

    LessonTypeSuggestion {
        recommended: rule.lesson_type,
        rationale: rule.rationale,
        alternatives: rule
            .alternatives
            .iter()
            .map(|&(lesson_type, reason)| Alternative {
                lesson_type,
                reason,
            })
            .collect(),
    }
}
