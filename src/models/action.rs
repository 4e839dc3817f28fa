use serde::{Deserialize, Serialize};

/// Wire tag of the only supported action
pub const CANONICAL_DOCUMENT_UPDATE: &str = "CANONICAL_DOCUMENT_UPDATE";

/// Change actions a proposal may embed, tagged by `type`
///
/// New action kinds are added as variants here and in [`ProposalAction::KNOWN_TYPES`].
/// Anything else is rejected during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProposalAction {
    #[serde(rename = "CANONICAL_DOCUMENT_UPDATE")]
    CanonicalDocumentUpdate(CanonicalDocumentUpdate),
}

impl ProposalAction {
    pub const KNOWN_TYPES: &'static [&'static str] = &[CANONICAL_DOCUMENT_UPDATE];

    pub fn action_type(&self) -> &'static str {
        match self {
            ProposalAction::CanonicalDocumentUpdate(_) => CANONICAL_DOCUMENT_UPDATE,
        }
    }
}

/// Payload of a `CANONICAL_DOCUMENT_UPDATE` action as authored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalDocumentUpdate {
    #[serde(
        rename = "targetDocumentId",
        alias = "target_document_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub target_document_id: Option<String>,

    #[serde(
        rename = "newContent",
        alias = "new_content",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub new_content: Option<String>,
}

/// The single validated mutation a proposal will perform (the apply preview)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAction {
    pub target_document_id: String,
    /// `None` is a preview gap: the preview renders, apply refuses it
    pub new_content: Option<String>,
}
