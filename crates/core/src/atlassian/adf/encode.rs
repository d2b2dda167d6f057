//! Markdown syntax tree → ADF encoder.
//!
//! Works on the tree produced by comrak. Block constructs without an ADF
//! counterpart are dropped and recorded in [`Warnings`]; inline wrappers that
//! have no mark (strikethrough, images, ...) are flattened into their children.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, Options};

use super::model::{HeadingLevel, Mark, Node};
use super::warnings::Warnings;

/// GFM parser options used for every conversion.
pub fn gfm_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options
}

/// Parse markdown with [`gfm_options`] and encode the resulting tree.
pub fn encode_markdown(markdown: &str) -> (Node, Warnings) {
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &gfm_options());
    encode(root)
}

/// Encode a parsed markdown document into an ADF `doc` node.
pub fn encode<'a>(root: &'a AstNode<'a>) -> (Node, Warnings) {
    let mut warnings = Warnings::new();
    let content = encode_blocks(root, &mut warnings);
    (Node::doc(content), warnings)
}

fn encode_blocks<'a>(parent: &'a AstNode<'a>, warnings: &mut Warnings) -> Vec<Node> {
    parent
        .children()
        .filter_map(|child| encode_block(child, warnings))
        .collect()
}

fn encode_block<'a>(node: &'a AstNode<'a>, warnings: &mut Warnings) -> Option<Node> {
    let data = node.data.borrow();

    match &data.value {
        NodeValue::Paragraph => {
            let content = encode_inlines(node);
            if content.is_empty() {
                None
            } else {
                Some(Node::Paragraph { content })
            }
        }
        NodeValue::Heading(heading) => Some(Node::Heading {
            level: HeadingLevel::try_from(heading.level).unwrap_or(HeadingLevel::H1),
            content: encode_inlines(node),
        }),
        NodeValue::CodeBlock(code_block) => {
            let literal = code_block
                .literal
                .strip_suffix('\n')
                .unwrap_or(&code_block.literal);
            let language = code_block
                .info
                .split_whitespace()
                .next()
                .map(str::to_string);
            let content = if literal.is_empty() {
                Vec::new()
            } else {
                vec![Node::text(literal)]
            };
            Some(Node::CodeBlock { language, content })
        }
        NodeValue::List(list) => {
            let content = encode_list_items(node, warnings);
            Some(match list.list_type {
                ListType::Bullet => Node::BulletList { content },
                ListType::Ordered => Node::OrderedList {
                    order: Some(list.start as u64).filter(|&start| start != 1),
                    content,
                },
            })
        }
        NodeValue::BlockQuote => Some(Node::Blockquote {
            content: encode_blocks(node, warnings),
        }),
        other => {
            warnings.add(node_name(other));
            None
        }
    }
}

/// Name reported for a markdown construct with no ADF counterpart.
fn node_name(value: &NodeValue) -> &'static str {
    match value {
        NodeValue::Document => "document",
        NodeValue::FrontMatter(..) => "frontmatter",
        NodeValue::BlockQuote => "block_quote",
        NodeValue::List(..) => "list",
        NodeValue::Item(..) => "item",
        NodeValue::TaskItem(..) => "taskitem",
        NodeValue::DescriptionList => "description_list",
        NodeValue::DescriptionItem(..) => "description_item",
        NodeValue::CodeBlock(..) => "code_block",
        NodeValue::HtmlBlock(..) => "html_block",
        NodeValue::Paragraph => "paragraph",
        NodeValue::Heading(..) => "heading",
        NodeValue::ThematicBreak => "thematic_break",
        NodeValue::FootnoteDefinition(..) => "footnote_definition",
        NodeValue::Table(..) => "table",
        NodeValue::TableRow(..) => "table_row",
        NodeValue::TableCell => "table_cell",
        NodeValue::Text(..) => "text",
        NodeValue::SoftBreak => "softbreak",
        NodeValue::LineBreak => "linebreak",
        NodeValue::Code(..) => "code",
        NodeValue::HtmlInline(..) => "html_inline",
        NodeValue::Emph => "emph",
        NodeValue::Strong => "strong",
        NodeValue::Strikethrough => "strikethrough",
        NodeValue::Link(..) => "link",
        NodeValue::Image(..) => "image",
        _ => "unknown",
    }
}

fn encode_list_items<'a>(list: &'a AstNode<'a>, warnings: &mut Warnings) -> Vec<Node> {
    let mut items = Vec::new();
    for child in list.children() {
        let data = child.data.borrow();
        match &data.value {
            NodeValue::Item(_) => items.push(Node::ListItem {
                content: encode_blocks(child, warnings),
            }),
            other => warnings.add(node_name(other)),
        }
    }
    items
}

/// Flatten the inline children of `node` into marked text runs.
fn encode_inlines<'a>(node: &'a AstNode<'a>) -> Vec<Node> {
    let mut runs = Vec::new();
    let mut marks = Vec::new();
    for child in node.children() {
        collect_inline(child, &mut marks, &mut runs);
    }
    consolidate(runs)
}

fn collect_inline<'a>(node: &'a AstNode<'a>, marks: &mut Vec<Mark>, runs: &mut Vec<Node>) {
    let data = node.data.borrow();

    match &data.value {
        NodeValue::Text(text) => push_text(runs, text, marks.clone()),
        NodeValue::SoftBreak => push_text(runs, " ", marks.clone()),
        NodeValue::LineBreak => runs.push(Node::HardBreak),
        NodeValue::Code(code) => {
            let mut code_marks = marks.clone();
            code_marks.push(Mark::Code);
            push_text(runs, &code.literal, code_marks);
        }
        NodeValue::Emph => with_mark(node, Mark::Italic, marks, runs),
        NodeValue::Strong => with_mark(node, Mark::Bold, marks, runs),
        NodeValue::Link(link) => with_mark(node, Mark::link(link.url.clone()), marks, runs),
        _ => {
            for child in node.children() {
                collect_inline(child, marks, runs);
            }
        }
    }
}

fn with_mark<'a>(node: &'a AstNode<'a>, mark: Mark, marks: &mut Vec<Mark>, runs: &mut Vec<Node>) {
    marks.push(mark);
    for child in node.children() {
        collect_inline(child, marks, runs);
    }
    marks.pop();
}

fn push_text(runs: &mut Vec<Node>, text: &str, marks: Vec<Mark>) {
    if !text.is_empty() {
        runs.push(Node::marked_text(text, marks));
    }
}

/// Merge adjacent text runs whose mark sequences are equal.
pub fn consolidate(runs: Vec<Node>) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(runs.len());

    for run in runs {
        if let (
            Some(Node::Text {
                text: previous,
                marks: previous_marks,
            }),
            Node::Text { text, marks },
        ) = (merged.last_mut(), &run)
        {
            if *previous_marks == *marks {
                previous.push_str(text);
                continue;
            }
        }
        merged.push(run);
    }

    merged
}
