//! Property-based tests for the Markdown converter
//!
//! Inputs are generated from the canonical dialect (words, headings, lists, fences)
//! so that the properties hold exactly rather than modulo known lossy corners.

use lesson_babel::transforms::normalize_markdown;
use lesson_babel::{to_document, to_markdown, Document, Mark, Node};
use proptest::prelude::*;

fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn sentence_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 1..6).prop_map(|words| words.join(" "))
}

fn mark_strategy() -> impl Strategy<Value = Mark> {
    prop_oneof![
        Just(Mark::Bold),
        Just(Mark::Italic),
        Just(Mark::Code),
        Just(Mark::Strike),
        "[a-z]{1,8}".prop_map(|host| Mark::link(format!("https://{host}.org"))),
    ]
}

/// One Markdown block in canonical spelling.
fn block_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (1usize..=6, sentence_strategy())
            .prop_map(|(level, text)| format!("{} {}", "#".repeat(level), text)),
        sentence_strategy(),
        prop::collection::vec(sentence_strategy(), 1..4).prop_map(|items| items
            .iter()
            .map(|item| format!("- {item}"))
            .collect::<Vec<_>>()
            .join("\n")),
        prop::collection::vec(sentence_strategy(), 1..4).prop_map(|items| items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {item}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")),
        (word_strategy(), sentence_strategy())
            .prop_map(|(lang, code)| format!("```{lang}\n{code}\n```")),
        sentence_strategy().prop_map(|text| format!("> {text}")),
        Just("---".to_string()),
    ]
}

fn markdown_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(block_strategy(), 0..6).prop_map(|blocks| blocks.join("\n\n"))
}

/// Lines as they show up mid-edit: bare block markers mixed with text and blanks.
fn loose_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec!["#", "# ", "##\t", "-", "- ", "1.", ">", "> ", "---", ""])
            .prop_map(str::to_string),
        sentence_strategy(),
    ]
}

proptest! {
    #[test]
    fn test_plain_line_is_one_paragraph(line in "[a-zA-Z][a-zA-Z0-9 ,]{0,40}") {
        let doc = to_document(&line);
        prop_assert_eq!(doc.content.len(), 1);
        prop_assert!(matches!(doc.content[0], Node::Paragraph(_)));
        prop_assert_eq!(doc.content[0].plain_text(), line);
    }

    #[test]
    fn test_paragraph_lines_join_with_spaces(lines in prop::collection::vec(sentence_strategy(), 1..5)) {
        let doc = to_document(&lines.join("\n"));
        prop_assert_eq!(doc.content.len(), 1);
        prop_assert_eq!(doc.content[0].plain_text(), lines.join(" "));
    }

    #[test]
    fn test_canonical_markdown_is_a_fixed_point(source in markdown_strategy()) {
        prop_assert_eq!(normalize_markdown(&source), source);
    }

    #[test]
    fn test_normalize_is_idempotent(source in markdown_strategy()) {
        let once = normalize_markdown(&source);
        prop_assert_eq!(normalize_markdown(&once), once);
    }

    #[test]
    fn test_normalize_is_idempotent_on_loose_lines(
        lines in prop::collection::vec(loose_line_strategy(), 1..8),
    ) {
        let once = normalize_markdown(&lines.join("\n"));
        prop_assert_eq!(normalize_markdown(&once), once);
    }

    #[test]
    fn test_mark_order_does_not_change_output(
        text in word_strategy(),
        marks in prop::sample::subsequence(
            vec![Mark::Bold, Mark::Italic, Mark::Code, Mark::Strike, Mark::link("https://x.org")],
            0..=5,
        ).prop_shuffle(),
    ) {
        let mut sorted = marks.clone();
        sorted.sort_by_key(Mark::rank);

        let shuffled = Document::new(vec![Node::paragraph(vec![Node::marked(text.clone(), marks)])]);
        let ordered = Document::new(vec![Node::paragraph(vec![Node::marked(text, sorted)])]);
        prop_assert_eq!(to_markdown(&shuffled), to_markdown(&ordered));
    }

    #[test]
    fn test_single_mark_survives_markdown(text in word_strategy(), mark in mark_strategy()) {
        let doc = Document::new(vec![Node::paragraph(vec![Node::marked(text, vec![mark])])]);
        prop_assert_eq!(to_document(&to_markdown(&doc)), doc);
    }
}
