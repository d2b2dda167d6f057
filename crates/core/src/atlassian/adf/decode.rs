//! ADF → markdown decoder.

use super::model::{Mark, Node};
use super::warnings::Warnings;

/// Render an ADF tree as GitHub-flavored markdown.
///
/// A `doc` root joins its blocks with a blank line. Any other root is rendered
/// as a single block. Nodes outside the supported set render as nothing and
/// are reported in the returned [`Warnings`].
pub fn decode(root: Option<&Node>) -> (String, Warnings) {
    let mut warnings = Warnings::new();
    let markdown = match root {
        None => String::new(),
        Some(Node::Doc { content, .. }) => render_blocks(content, &mut warnings),
        Some(node) => render_block(node, &mut warnings),
    };
    (markdown, warnings)
}

fn render_blocks(blocks: &[Node], warnings: &mut Warnings) -> String {
    blocks
        .iter()
        .map(|block| render_block(block, warnings))
        .filter(|rendered| !rendered.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_block(node: &Node, warnings: &mut Warnings) -> String {
    match node {
        Node::Paragraph { content } => render_inline(content, warnings),
        Node::Heading { level, content } => {
            let hashes = "#".repeat(level.as_u8() as usize);
            let text = render_inline(content, warnings);
            if text.is_empty() {
                hashes
            } else {
                format!("{hashes} {text}")
            }
        }
        Node::CodeBlock { language, content } => {
            let language = language.as_deref().unwrap_or_default();
            let code = plain_text(content);
            if code.is_empty() {
                format!("```{language}\n```")
            } else {
                format!("```{language}\n{code}\n```")
            }
        }
        Node::BulletList { content } => content
            .iter()
            .map(|item| format!("- {}", render_list_item(item, warnings)))
            .collect::<Vec<_>>()
            .join("\n"),
        Node::OrderedList { order, content } => {
            let start = order.unwrap_or(1);
            content
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    let number = start.saturating_add(index as u64);
                    format!("{number}. {}", render_list_item(item, warnings))
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
        Node::ListItem { .. } => render_list_item(node, warnings),
        Node::Blockquote { content } => {
            let quoted = render_blocks(content, warnings);
            if quoted.is_empty() {
                return quoted;
            }
            quoted
                .split('\n')
                .map(|line| format!("> {line}"))
                .collect::<Vec<_>>()
                .join("\n")
        }
        Node::HardBreak => "\n".to_string(),
        Node::Doc { content, .. } => render_blocks(content, warnings),
        Node::Text { .. } | Node::Unsupported { .. } => {
            warnings.add(node.type_name());
            String::new()
        }
    }
}

/// Render a list item's blocks on one line, separated by spaces.
fn render_list_item(item: &Node, warnings: &mut Warnings) -> String {
    match item {
        Node::ListItem { content } => content
            .iter()
            .map(|block| render_block(block, warnings))
            .filter(|rendered| !rendered.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        other => render_block(other, warnings),
    }
}

fn render_inline(content: &[Node], warnings: &mut Warnings) -> String {
    let mut output = String::new();
    for node in content {
        match node {
            Node::Text { text, marks } => output.push_str(&format_marked(text, marks, warnings)),
            Node::HardBreak => output.push('\n'),
            other => warnings.add(other.type_name()),
        }
    }
    output
}

/// Wrap a text run in markdown syntax for its marks.
///
/// Code wins over emphasis since markdown cannot nest emphasis inside a code
/// span. A link always wraps the styled text last.
fn format_marked(text: &str, marks: &[Mark], warnings: &mut Warnings) -> String {
    if marks.is_empty() {
        return text.to_string();
    }

    let mut bold = false;
    let mut italic = false;
    let mut code = false;
    let mut href = None;
    for mark in marks {
        match mark {
            Mark::Bold => bold = true,
            Mark::Italic => italic = true,
            Mark::Code => code = true,
            Mark::Link { href: target } => href = Some(target.as_str()),
            Mark::Unsupported(name) => warnings.add(name.as_str()),
        }
    }

    let styled = if code {
        format!("`{text}`")
    } else if bold && italic {
        format!("***{text}***")
    } else if bold {
        format!("**{text}**")
    } else if italic {
        format!("*{text}*")
    } else {
        text.to_string()
    };

    match href {
        Some(href) => format!("[{styled}]({href})"),
        None => styled,
    }
}

/// Concatenate the literal text under `content`, ignoring marks.
fn plain_text(content: &[Node]) -> String {
    let mut output = String::new();
    for node in content {
        match node {
            Node::Text { text, .. } => output.push_str(text),
            Node::HardBreak => output.push('\n'),
            other => output.push_str(&plain_text(other.content())),
        }
    }
    output
}
