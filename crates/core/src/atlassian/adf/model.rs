//! Document model for ADF (Atlassian Document Format) trees.
//!
//! Nodes are a closed set of kinds plus an [`Node::Unsupported`] sentinel that
//! keeps whatever the API sent so nothing is lost on deserialization. The wire
//! shape goes through [`RawNode`], which is where untyped JSON attributes get
//! normalized.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// ADF documents are always version 1.
pub const ADF_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("heading level must be between 1 and 6")]
pub struct InvalidHeadingLevel;

/// Heading depth, always within `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const H1: Self = HeadingLevel(1);
    pub const H6: Self = HeadingLevel(6);

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Normalize a JSON number into a level.
    ///
    /// JSON numbers are untyped, so `2` and `2.0` are the same level. Missing or
    /// non-numeric values fall back to H1 and out-of-range values are clamped.
    pub fn from_json(value: Option<&Value>) -> Self {
        let level = value.and_then(|v| {
            v.as_u64()
                .or_else(|| v.as_i64().map(|i| i.max(0) as u64))
                .or_else(|| {
                    v.as_f64()
                        .filter(|f| f.is_finite())
                        .map(|f| f.round().max(0.0) as u64)
                })
        });

        match level {
            Some(0) | None => Self::H1,
            Some(n) if n > 6 => Self::H6,
            Some(n) => HeadingLevel(n as u8),
        }
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = InvalidHeadingLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=6).contains(&value) {
            Ok(HeadingLevel(value))
        } else {
            Err(InvalidHeadingLevel)
        }
    }
}

/// Inline style annotation on a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mark {
    Bold,
    Italic,
    Code,
    Link { href: String },
    /// A mark type this converter does not render (strike, underline, ...).
    Unsupported(String),
}

impl Mark {
    pub fn link(href: impl Into<String>) -> Self {
        Mark::Link { href: href.into() }
    }

    /// The `type` string used on the wire.
    pub fn type_name(&self) -> &str {
        match self {
            Mark::Bold => "strong",
            Mark::Italic => "em",
            Mark::Code => "code",
            Mark::Link { .. } => "link",
            Mark::Unsupported(name) => name,
        }
    }
}

/// A node of an ADF tree.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub enum Node {
    Doc {
        version: u32,
        content: Vec<Node>,
    },
    Paragraph {
        content: Vec<Node>,
    },
    Heading {
        level: HeadingLevel,
        content: Vec<Node>,
    },
    CodeBlock {
        language: Option<String>,
        content: Vec<Node>,
    },
    BulletList {
        content: Vec<Node>,
    },
    OrderedList {
        /// Number of the first item; `None` means the list starts at 1.
        order: Option<u64>,
        content: Vec<Node>,
    },
    ListItem {
        content: Vec<Node>,
    },
    Blockquote {
        content: Vec<Node>,
    },
    Text {
        text: String,
        marks: Vec<Mark>,
    },
    HardBreak,
    /// Any node type outside the supported set, kept verbatim.
    Unsupported {
        kind: String,
        attrs: Option<Value>,
        content: Vec<Node>,
    },
}

impl Node {
    pub fn doc(content: Vec<Node>) -> Self {
        Node::Doc {
            version: ADF_VERSION,
            content,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn marked_text(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Node::Text {
            text: text.into(),
            marks,
        }
    }

    /// The `type` string used on the wire.
    pub fn type_name(&self) -> &str {
        match self {
            Node::Doc { .. } => "doc",
            Node::Paragraph { .. } => "paragraph",
            Node::Heading { .. } => "heading",
            Node::CodeBlock { .. } => "codeBlock",
            Node::BulletList { .. } => "bulletList",
            Node::OrderedList { .. } => "orderedList",
            Node::ListItem { .. } => "listItem",
            Node::Blockquote { .. } => "blockquote",
            Node::Text { .. } => "text",
            Node::HardBreak => "hardBreak",
            Node::Unsupported { kind, .. } => kind,
        }
    }

    /// Child nodes; empty for leaves.
    pub fn content(&self) -> &[Node] {
        match self {
            Node::Doc { content, .. }
            | Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::CodeBlock { content, .. }
            | Node::BulletList { content }
            | Node::OrderedList { content, .. }
            | Node::ListItem { content }
            | Node::Blockquote { content }
            | Node::Unsupported { content, .. } => content,
            Node::Text { .. } | Node::HardBreak => &[],
        }
    }
}

/// Wire representation of a mark.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawMark {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Value>,
}

impl From<RawMark> for Mark {
    fn from(raw: RawMark) -> Self {
        match raw.kind.as_str() {
            "strong" => Mark::Bold,
            "em" => Mark::Italic,
            "code" => Mark::Code,
            "link" => {
                let href = raw
                    .attrs
                    .as_ref()
                    .and_then(|a| a.get("href"))
                    .and_then(|h| h.as_str())
                    .unwrap_or_default();
                Mark::link(href)
            }
            _ => Mark::Unsupported(raw.kind),
        }
    }
}

impl From<Mark> for RawMark {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::Link { href } => RawMark {
                kind: "link".to_string(),
                attrs: Some(json!({ "href": href })),
            },
            Mark::Unsupported(kind) => RawMark { kind, attrs: None },
            other => RawMark {
                kind: other.type_name().to_string(),
                attrs: None,
            },
        }
    }
}

/// Wire representation of a node: every field optional, absent fields omitted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawNode {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<RawNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<RawMark>>,
}

fn attr<'a>(attrs: &'a Option<Value>, key: &str) -> Option<&'a Value> {
    attrs.as_ref().and_then(|a| a.get(key))
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        let content: Vec<Node> = raw
            .content
            .unwrap_or_default()
            .into_iter()
            .map(Node::from)
            .collect();

        match raw.kind.as_str() {
            "doc" => Node::Doc {
                version: raw.version.unwrap_or(ADF_VERSION),
                content,
            },
            "paragraph" => Node::Paragraph { content },
            "heading" => Node::Heading {
                level: HeadingLevel::from_json(attr(&raw.attrs, "level")),
                content,
            },
            "codeBlock" => Node::CodeBlock {
                language: attr(&raw.attrs, "language")
                    .and_then(|l| l.as_str())
                    .filter(|l| !l.is_empty())
                    .map(str::to_string),
                content,
            },
            "bulletList" => Node::BulletList { content },
            "orderedList" => Node::OrderedList {
                order: attr(&raw.attrs, "order")
                    .and_then(|o| o.as_u64().or_else(|| o.as_f64().map(|f| f.max(0.0) as u64)))
                    .filter(|&o| o != 1),
                content,
            },
            "listItem" => Node::ListItem { content },
            "blockquote" => Node::Blockquote { content },
            "text" => Node::Text {
                text: raw.text.unwrap_or_default(),
                marks: raw
                    .marks
                    .unwrap_or_default()
                    .into_iter()
                    .map(Mark::from)
                    .collect(),
            },
            "hardBreak" => Node::HardBreak,
            _ => Node::Unsupported {
                kind: raw.kind,
                attrs: raw.attrs,
                content,
            },
        }
    }
}

fn raw_children(content: Vec<Node>) -> Option<Vec<RawNode>> {
    Some(content.into_iter().map(RawNode::from).collect())
}

fn raw_block(kind: &str, attrs: Option<Value>, content: Vec<Node>) -> RawNode {
    RawNode {
        kind: kind.to_string(),
        attrs,
        content: raw_children(content),
        ..RawNode::default()
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        match node {
            Node::Doc { version, content } => RawNode {
                kind: "doc".to_string(),
                version: Some(version),
                content: raw_children(content),
                ..RawNode::default()
            },
            Node::Paragraph { content } => raw_block("paragraph", None, content),
            Node::Heading { level, content } => {
                raw_block("heading", Some(json!({ "level": level.as_u8() })), content)
            }
            Node::CodeBlock { language, content } => {
                let attrs = language.map(|language| json!({ "language": language }));
                raw_block("codeBlock", attrs, content)
            }
            Node::BulletList { content } => raw_block("bulletList", None, content),
            Node::OrderedList { order, content } => {
                let attrs = order.map(|order| json!({ "order": order }));
                raw_block("orderedList", attrs, content)
            }
            Node::ListItem { content } => raw_block("listItem", None, content),
            Node::Blockquote { content } => raw_block("blockquote", None, content),
            Node::Text { text, marks } => RawNode {
                kind: "text".to_string(),
                text: Some(text),
                marks: if marks.is_empty() {
                    None
                } else {
                    Some(marks.into_iter().map(RawMark::from).collect())
                },
                ..RawNode::default()
            },
            Node::HardBreak => RawNode {
                kind: "hardBreak".to_string(),
                ..RawNode::default()
            },
            Node::Unsupported {
                kind,
                attrs,
                content,
            } => RawNode {
                kind,
                attrs,
                content: if content.is_empty() {
                    None
                } else {
                    raw_children(content)
                },
                ..RawNode::default()
            },
        }
    }
}
