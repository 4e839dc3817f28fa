use crate::models::{ProposalStatus, Severity};
use crate::parser::ExtractionError;
use std::fmt;

/// Lifecycle operations, for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Submit,
    Approve,
    Reject,
    Apply,
}

impl Transition {
    /// The only status this transition may start from
    pub fn required_status(&self) -> ProposalStatus {
        match self {
            Transition::Submit => ProposalStatus::Draft,
            Transition::Approve | Transition::Reject => ProposalStatus::Submitted,
            Transition::Apply => ProposalStatus::Approved,
        }
    }

    /// Status reached on success
    pub fn target_status(&self) -> ProposalStatus {
        match self {
            Transition::Submit => ProposalStatus::Submitted,
            Transition::Approve => ProposalStatus::Approved,
            Transition::Reject => ProposalStatus::Rejected,
            Transition::Apply => ProposalStatus::Applied,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Transition::Submit => "submit",
            Transition::Approve => "approve",
            Transition::Reject => "reject",
            Transition::Apply => "apply",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a lifecycle operation was refused. The proposal is never mutated when
/// one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("cannot {transition} a proposal in {from} (requires {})", .transition.required_status())]
    InvalidTransition {
        transition: Transition,
        from: ProposalStatus,
    },

    #[error("proposal in {0} can no longer be edited")]
    EditNotAllowed(ProposalStatus),

    #[error("apply preview failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("action for '{0}' has no newContent")]
    MissingNewContent(String),

    #[error("target document not found: {0}")]
    TargetNotFound(String),

    #[error("target document '{target}' is {severity}: {}", .reasons.join("; "))]
    TargetSeverity {
        target: String,
        severity: Severity,
        reasons: Vec<String>,
    },
}

impl LifecycleError {
    /// State errors, as opposed to validation errors in the payload
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            LifecycleError::InvalidTransition { .. } | LifecycleError::EditNotAllowed(_)
        )
    }
}
