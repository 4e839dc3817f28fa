//! Apply-Action Block Parser (AST-based)
//!
//! Finds the fenced `json` block embedded in a proposal's markdown and
//! resolves it into the single mutation the proposal will perform.
//! Uses pulldown-cmark AST instead of string scanning, so fences inside
//! other code blocks or indented examples are never mistaken for the payload.

use crate::models::{ProposalAction, ResolvedAction};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use serde_json::Value;

/// Extracted fenced block with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredBlock {
    /// Raw block content
    pub content: String,
    /// Info string (e.g., "json", "json {.action}")
    pub info_string: String,
}

/// Why an apply preview could not be resolved
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("no structured block found")]
    NoStructuredBlock,

    #[error("invalid structured block: {0}")]
    Parse(String),

    #[error("missing actions array")]
    MissingActions,

    #[error("empty actions array")]
    EmptyActions,

    #[error("unsupported action type: {0}")]
    UnsupportedActionType(String),

    #[error("invalid action: {0}")]
    InvalidAction(String),

    #[error("missing targetDocumentId")]
    MissingTarget,
}

/// Return the first fenced code block tagged as JSON
pub fn find_structured_block(content: &str) -> Option<StructuredBlock> {
    let parser = Parser::new_ext(content, Options::empty());
    let mut current: Option<StructuredBlock> = None;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                if is_json_info(&info) {
                    current = Some(StructuredBlock {
                        content: String::new(),
                        info_string: info.to_string(),
                    });
                }
            }
            Event::Text(text) => {
                if let Some(block) = current.as_mut() {
                    block.content.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if current.is_some() {
                    return current;
                }
            }
            _ => {}
        }
    }

    None
}

/// Match `json` and `json {attrs}` but not `jsonc` or `json5`
fn is_json_info(info: &str) -> bool {
    let lang = info.split_whitespace().next().unwrap_or("");
    lang.eq_ignore_ascii_case("json")
}

/// Resolve the apply preview of a proposal body
///
/// Pure: never touches the proposal, and unchanged content always resolves to
/// the same result. Only the first action is considered; any further entries
/// in `actions` are ignored.
pub fn extract_apply_action(content: &str) -> Result<ResolvedAction, ExtractionError> {
    let block = find_structured_block(content).ok_or(ExtractionError::NoStructuredBlock)?;

    let value: Value =
        serde_json::from_str(&block.content).map_err(|e| ExtractionError::Parse(e.to_string()))?;

    let actions = value
        .get("actions")
        .and_then(Value::as_array)
        .ok_or(ExtractionError::MissingActions)?;

    let first = actions.first().ok_or(ExtractionError::EmptyActions)?;

    let action_type = first
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("<none>");
    if !ProposalAction::KNOWN_TYPES.contains(&action_type) {
        return Err(ExtractionError::UnsupportedActionType(action_type.to_string()));
    }

    let action: ProposalAction = serde_json::from_value(first.clone())
        .map_err(|e| ExtractionError::InvalidAction(e.to_string()))?;

    let resolved = match action {
        ProposalAction::CanonicalDocumentUpdate(update) => {
            let target = update
                .target_document_id
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .ok_or(ExtractionError::MissingTarget)?;
            ResolvedAction {
                target_document_id: target,
                new_content: update.new_content,
            }
        }
    };

    tracing::debug!(
        target_document_id = %resolved.target_document_id,
        has_content = resolved.new_content.is_some(),
        "Resolved apply preview"
    );

    Ok(resolved)
}

// =============================================================================
// Tests
// =============================================================================
