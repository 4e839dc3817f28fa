use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a proposal
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposalStatus {
    /// Being written, freely editable
    #[default]
    Draft,
    /// Awaiting review, still editable
    Submitted,
    /// Accepted, waiting to be applied
    Approved,
    /// Turned down (terminal)
    Rejected,
    /// Change executed against the target document (terminal)
    Applied,
}

impl ProposalStatus {
    pub fn name(&self) -> &'static str {
        match self {
            ProposalStatus::Draft => "DRAFT",
            ProposalStatus::Submitted => "SUBMITTED",
            ProposalStatus::Approved => "APPROVED",
            ProposalStatus::Rejected => "REJECTED",
            ProposalStatus::Applied => "APPLIED",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ProposalStatus::Draft => "📝",
            ProposalStatus::Submitted => "🔍",
            ProposalStatus::Approved => "👍",
            ProposalStatus::Rejected => "⛔",
            ProposalStatus::Applied => "✅",
        }
    }

    /// No transition leaves a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProposalStatus::Rejected | ProposalStatus::Applied)
    }

    /// Title and content may only change before approval
    pub fn is_editable(&self) -> bool {
        matches!(self, ProposalStatus::Draft | ProposalStatus::Submitted)
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A change request against canonical content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: String,

    pub title: String,

    /// Markdown body, may embed a fenced `json` action block
    pub content: String,

    #[serde(default)]
    pub status: ProposalStatus,

    pub updated_at: DateTime<Utc>,

    /// Free text recorded on rejection, kept for audit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl Proposal {
    /// Create a proposal in DRAFT, the only creation state
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            status: ProposalStatus::Draft,
            updated_at: Utc::now(),
            rejection_reason: None,
        }
    }

    /// Update status and timestamp
    pub(crate) fn set_status(&mut self, status: ProposalStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// Partial proposal edit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ProposalPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_proposal_is_draft() {
        let proposal = Proposal::new("p-1", "Tighten canon", "body");
        assert_eq!(proposal.status, ProposalStatus::Draft);
        assert!(proposal.rejection_reason.is_none());
    }

    #[test]
    fn test_terminal_and_editable_statuses() {
        let terminal: Vec<_> = [
            ProposalStatus::Draft,
            ProposalStatus::Submitted,
            ProposalStatus::Approved,
            ProposalStatus::Rejected,
            ProposalStatus::Applied,
        ]
        .into_iter()
        .filter(|s| s.is_terminal())
        .collect();
        assert_eq!(terminal, vec![ProposalStatus::Rejected, ProposalStatus::Applied]);

        assert!(ProposalStatus::Draft.is_editable());
        assert!(ProposalStatus::Submitted.is_editable());
        assert!(!ProposalStatus::Approved.is_editable());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&ProposalStatus::Submitted).unwrap();
        assert_eq!(json, "\"SUBMITTED\"");
    }
}
