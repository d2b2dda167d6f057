//! Jira field helpers built on the ADF converter.
//!
//! Jira descriptions and comment bodies arrive as ADF JSON (or, on older
//! fields, as plain strings) and are submitted as ADF. These helpers sit
//! between raw API JSON and the markdown a user reads and writes.

use serde::{Deserialize, Serialize};

use super::adf::{adf_value_to_markdown, markdown_to_adf_value, Converted};

/// Comment on a Jira ticket
#[derive(Debug, Serialize, Clone, Deserialize, PartialEq)]
pub struct JiraComment {
    #[serde(rename = "id")]
    pub comment_id: String,
    #[serde(rename = "body")]
    pub body: serde_json::Value,
    #[serde(rename = "created")]
    pub created_at: String,
}

/// Which request body a converted document is wrapped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadKind {
    /// `{"fields": {"description": <adf>}}` for issue create/update.
    Description,
    /// `{"body": <adf>}` for the comment endpoint.
    Comment,
}

/// Render a description field (string or ADF) as markdown.
///
/// # Arguments
/// * `value` - The description field value from Jira API
///
/// # Returns
/// * `Option<Converted<String>>` - Markdown plus warnings, or None if the field
///   is absent, not a document, or renders to nothing
pub fn render_description(value: Option<serde_json::Value>) -> Option<Converted<String>> {
    let value = value?;
    let is_document = match &value {
        serde_json::Value::String(_) => true,
        serde_json::Value::Object(_) => {
            value.get("type").and_then(|t| t.as_str()) == Some("doc")
        }
        _ => false,
    };
    if !is_document {
        return None;
    }

    let rendered = adf_value_to_markdown(&value);
    if rendered.output.trim().is_empty() {
        None
    } else {
        Some(rendered)
    }
}

/// Render a comment body as markdown.
pub fn render_comment(comment: &JiraComment) -> Converted<String> {
    adf_value_to_markdown(&comment.body)
}

/// Convert markdown to ADF and wrap it in the request body for `kind`.
pub fn build_payload(markdown: &str, kind: PayloadKind) -> Converted<serde_json::Value> {
    markdown_to_adf_value(markdown).map(|adf| match kind {
        PayloadKind::Description => serde_json::json!({ "fields": { "description": adf } }),
        PayloadKind::Comment => serde_json::json!({ "body": adf }),
    })
}
