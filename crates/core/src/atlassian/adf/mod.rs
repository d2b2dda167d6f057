//! Markdown ⇄ ADF (Atlassian Document Format) conversion.
//!
//! Jira stores descriptions and comments as ADF JSON trees. This module turns
//! GitHub-flavored markdown into ADF for submission and ADF back into markdown
//! for display.
//!
//! Conversion never fails. Constructs ADF or this converter cannot express
//! (tables, panels, rules, mentions, ...) are skipped and reported as
//! warnings, one per distinct element name, sorted. Every call is a pure
//! function of its input.
//!
//! Markdown built only from supported constructs survives a full cycle:
//!
//! ```rust,ignore
//! use adfmd_core::atlassian::adf::{adf_to_markdown, markdown_to_adf};
//!
//! let markdown = "## Summary\n\nShip **it** in `v2`";
//! let adf = markdown_to_adf(markdown);
//! assert!(adf.warnings.is_empty());
//! assert_eq!(adf_to_markdown(Some(&adf.output)).output, markdown);
//! ```

pub mod decode;
pub mod encode;
pub mod model;
pub mod warnings;

#[cfg(test)]
mod proptests;

use serde::Serialize;

pub use model::{HeadingLevel, InvalidHeadingLevel, Mark, Node, ADF_VERSION};
pub use warnings::Warnings;

/// Result of a conversion: the converted value plus non-fatal warnings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Converted<T> {
    pub output: T,
    pub warnings: Vec<String>,
}

impl<T> Converted<T> {
    fn new(output: T, warnings: Warnings) -> Self {
        Self {
            output,
            warnings: warnings.finish(),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Converted<U> {
        Converted {
            output: f(self.output),
            warnings: self.warnings,
        }
    }
}

/// Convert markdown to an ADF `doc` node.
pub fn markdown_to_adf(markdown: &str) -> Converted<Node> {
    let (doc, warnings) = encode::encode_markdown(markdown);
    Converted::new(doc, warnings)
}

/// Convert markdown to ADF JSON, ready to drop into an API payload.
pub fn markdown_to_adf_value(markdown: &str) -> Converted<serde_json::Value> {
    markdown_to_adf(markdown).map(|doc| {
        serde_json::to_value(&doc).unwrap_or_else(|_| serde_json::json!({
            "type": "doc",
            "version": ADF_VERSION,
            "content": []
        }))
    })
}

/// Convert an ADF tree to markdown. `None` yields an empty string.
pub fn adf_to_markdown(doc: Option<&Node>) -> Converted<String> {
    let (markdown, warnings) = decode::decode(doc);
    Converted::new(markdown, warnings)
}

/// Convert raw ADF JSON, as returned by the API, to markdown.
///
/// Plain strings pass through unchanged (older Jira fields are not ADF).
/// Values that are neither a string nor a node object yield an empty result.
pub fn adf_value_to_markdown(value: &serde_json::Value) -> Converted<String> {
    match value {
        serde_json::Value::String(text) => Converted {
            output: text.clone(),
            warnings: Vec::new(),
        },
        serde_json::Value::Object(_) => {
            let doc = serde_json::from_value::<Node>(value.clone()).ok();
            adf_to_markdown(doc.as_ref())
        }
        _ => adf_to_markdown(None),
    }
}
