//! Property-based tests for the markdown ⇄ ADF converter
//!
//! Markdown is generated from the supported constructs only, so a full
//! encode/decode cycle must reproduce it exactly.

use super::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
enum Block {
    Paragraph(String),
    Heading(usize, String),
    Code(Option<String>, Vec<String>),
    Bullets(Vec<String>),
    Numbers(Vec<String>),
    Quote(String),
}

impl Block {
    fn render(&self) -> String {
        match self {
            Block::Paragraph(text) => text.clone(),
            Block::Heading(level, text) => format!("{} {}", "#".repeat(*level), text),
            Block::Code(language, lines) => format!(
                "```{}\n{}\n```",
                language.as_deref().unwrap_or_default(),
                lines.join("\n")
            ),
            Block::Bullets(items) => items
                .iter()
                .map(|item| format!("- {item}"))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Numbers(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}. {item}", i + 1))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Quote(text) => format!("> {text}"),
        }
    }

    /// Lists of the same kind separated by a blank line parse as one list.
    fn same_list_kind(&self, other: &Block) -> bool {
        matches!(
            (self, other),
            (Block::Bullets(_), Block::Bullets(_)) | (Block::Numbers(_), Block::Numbers(_))
        )
    }
}

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}".prop_map(|s| s.to_string())
}

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        word(),
        word().prop_map(|w| format!("**{w}**")),
        word().prop_map(|w| format!("*{w}*")),
        word().prop_map(|w| format!("***{w}***")),
        word().prop_map(|w| format!("`{w}`")),
        (word(), word()).prop_map(|(text, path)| format!("[{text}](https://example.com/{path})")),
        (word(), word()).prop_map(|(text, path)| format!("[**{text}**](https://example.com/{path})")),
    ]
}

fn inline_text() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..6).prop_map(|segments| segments.join(" "))
}

fn block() -> impl Strategy<Value = Block> {
    prop_oneof![
        inline_text().prop_map(Block::Paragraph),
        (1usize..=6, inline_text()).prop_map(|(level, text)| Block::Heading(level, text)),
        (
            prop::option::of("[a-z]{1,6}"),
            prop::collection::vec("[a-z]{1,6}( [a-z]{1,6}){0,3}", 1..4)
        )
            .prop_map(|(language, lines)| Block::Code(language, lines)),
        prop::collection::vec(inline_text(), 1..4).prop_map(Block::Bullets),
        prop::collection::vec(inline_text(), 1..4).prop_map(Block::Numbers),
        inline_text().prop_map(Block::Quote),
    ]
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(block(), 0..6).prop_map(|blocks| {
        let mut kept: Vec<Block> = Vec::new();
        for block in blocks {
            if kept.last().is_some_and(|last| last.same_list_kind(&block)) {
                continue;
            }
            kept.push(block);
        }
        kept.iter().map(Block::render).collect::<Vec<_>>().join("\n\n")
    })
}

fn assert_consolidated(node: &Node) -> Result<(), TestCaseError> {
    let content = node.content();
    for pair in content.windows(2) {
        if let [Node::Text { marks: left, .. }, Node::Text { marks: right, .. }] = pair {
            prop_assert_ne!(left, right, "adjacent runs share marks in {:?}", node);
        }
    }
    for child in content {
        assert_consolidated(child)?;
    }
    Ok(())
}

// Property 1: supported markdown survives encode then decode unchanged
proptest! {
    #[test]
    fn prop_round_trip_supported_markdown(markdown in document()) {
        let adf = markdown_to_adf(&markdown);
        prop_assert!(adf.warnings.is_empty(), "warnings: {:?}", adf.warnings);

        let decoded = adf_to_markdown(Some(&adf.output));
        prop_assert_eq!(decoded.output, markdown);
        prop_assert!(decoded.warnings.is_empty());
    }
}

// Property 2: encoder output never holds two adjacent runs with equal marks,
// whatever the input looks like
proptest! {
    #[test]
    fn prop_encoder_output_is_consolidated(markdown in "[a-z *_`~\\[\\]()>#\\-\n]{0,80}") {
        let adf = markdown_to_adf(&markdown);
        assert_consolidated(&adf.output)?;
    }
}

// Property 3: warnings are sorted and distinct regardless of order or repetition
proptest! {
    #[test]
    fn prop_warnings_sorted_and_distinct(
        kinds in prop::collection::vec(prop_oneof![
            Just("table"),
            Just("panel"),
            Just("rule"),
            Just("paragraph"),
        ], 0..12)
    ) {
        let content: Vec<serde_json::Value> = kinds
            .iter()
            .map(|kind| match *kind {
                "paragraph" => serde_json::json!({
                    "type": "paragraph",
                    "content": [{"type": "text", "text": "kept"}]
                }),
                other => serde_json::json!({"type": other}),
            })
            .collect();
        let value = serde_json::json!({"type": "doc", "version": 1, "content": content});

        let result = adf_value_to_markdown(&value);

        let expected: Vec<String> = kinds
            .iter()
            .filter(|kind| **kind != "paragraph")
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|kind| format!("unsupported element: {kind}"))
            .collect();
        prop_assert_eq!(result.warnings, expected);

        let paragraphs = kinds.iter().filter(|kind| **kind == "paragraph").count();
        prop_assert_eq!(result.output.matches("kept").count(), paragraphs);
    }
}
