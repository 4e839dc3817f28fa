use super::error::{LifecycleError, Transition};
use crate::models::{
    ApplyPolicy, AuditFinding, Document, DocumentPatch, Proposal, ProposalPatch, ResolvedAction,
    Severity,
};
use crate::parser::{extract_apply_action, ExtractionError};
use crate::validator::SeverityScorer;
use chrono::Utc;

/// Validated apply, ready to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyPlan {
    pub target_document_id: String,
    pub new_content: String,
    /// Target finding before the update
    pub target_finding: AuditFinding,
    /// Set when the target is WARN and the policy lets it through
    pub caution: Option<String>,
}

/// Result of a successful apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub target_document_id: String,
    pub previous: AuditFinding,
    pub updated: AuditFinding,
    pub caution: Option<String>,
}

/// Proposal state machine
///
/// `DRAFT -> SUBMITTED -> APPROVED -> APPLIED`, plus `SUBMITTED -> REJECTED`.
/// Every operation validates before it mutates.
#[derive(Debug, Clone, Default)]
pub struct LifecycleEngine {
    scorer: SeverityScorer,
    policy: ApplyPolicy,
}

impl LifecycleEngine {
    pub fn new(scorer: SeverityScorer, policy: ApplyPolicy) -> Self {
        Self { scorer, policy }
    }

    pub fn policy(&self) -> ApplyPolicy {
        self.policy
    }

    pub fn submit(&self, proposal: &mut Proposal) -> Result<(), LifecycleError> {
        self.transition(proposal, Transition::Submit)
    }

    pub fn approve(&self, proposal: &mut Proposal) -> Result<(), LifecycleError> {
        self.transition(proposal, Transition::Approve)
    }

    /// Reject a submitted proposal; the reason is kept for audit only
    pub fn reject(&self, proposal: &mut Proposal, reason: Option<String>) -> Result<(), LifecycleError> {
        self.transition(proposal, Transition::Reject)?;
        proposal.rejection_reason = reason.filter(|r| !r.trim().is_empty());
        Ok(())
    }

    /// Edit title and/or content while the proposal is DRAFT or SUBMITTED
    pub fn edit(&self, proposal: &mut Proposal, patch: &ProposalPatch) -> Result<(), LifecycleError> {
        if !proposal.status.is_editable() {
            return Err(LifecycleError::EditNotAllowed(proposal.status));
        }

        if let Some(title) = &patch.title {
            proposal.title = title.clone();
        }
        if let Some(content) = &patch.content {
            proposal.content = content.clone();
        }
        proposal.updated_at = Utc::now();

        tracing::debug!(proposal_id = %proposal.id, "Edited proposal");
        Ok(())
    }

    /// Resolve the apply preview from the current content
    pub fn preview(&self, proposal: &Proposal) -> Result<ResolvedAction, ExtractionError> {
        extract_apply_action(&proposal.content)
    }

    /// Validate an apply without executing it
    pub fn plan_apply(&self, proposal: &Proposal, documents: &[Document]) -> Result<ApplyPlan, LifecycleError> {
        self.ensure_status(proposal, Transition::Apply)?;

        let action = self.preview(proposal)?;
        let new_content = action
            .new_content
            .ok_or_else(|| LifecycleError::MissingNewContent(action.target_document_id.clone()))?;

        let target = documents
            .iter()
            .find(|d| d.id == action.target_document_id)
            .ok_or_else(|| LifecycleError::TargetNotFound(action.target_document_id.clone()))?;

        let finding = self.scorer.score(target);
        let blocked = match finding.severity {
            Severity::Fail => true,
            Severity::Warn => self.policy.block_on_warn,
            Severity::Ok => false,
        };
        if blocked {
            tracing::warn!(
                proposal_id = %proposal.id,
                target = %action.target_document_id,
                severity = %finding.severity,
                "Apply blocked by target severity"
            );
            return Err(LifecycleError::TargetSeverity {
                target: action.target_document_id,
                severity: finding.severity,
                reasons: finding.reasons,
            });
        }

        let caution = (finding.severity == Severity::Warn).then(|| {
            format!(
                "target document '{}' is WARN: {}",
                action.target_document_id,
                finding.reasons.join("; ")
            )
        });

        Ok(ApplyPlan {
            target_document_id: action.target_document_id,
            new_content,
            target_finding: finding,
            caution,
        })
    }

    /// Execute an APPROVED proposal against the document set
    ///
    /// On any error neither the proposal nor the documents are touched.
    pub fn apply(&self, proposal: &mut Proposal, documents: &mut [Document]) -> Result<ApplyOutcome, LifecycleError> {
        let plan = self.plan_apply(proposal, documents)?;

        let target = documents
            .iter_mut()
            .find(|d| d.id == plan.target_document_id)
            .ok_or_else(|| LifecycleError::TargetNotFound(plan.target_document_id.clone()))?;

        target.apply_patch(&DocumentPatch::content(plan.new_content));
        let updated = self.scorer.score(target);
        proposal.set_status(Transition::Apply.target_status());

        tracing::info!(
            proposal_id = %proposal.id,
            target = %plan.target_document_id,
            severity = %updated.severity,
            "Applied proposal"
        );

        Ok(ApplyOutcome {
            target_document_id: plan.target_document_id,
            previous: plan.target_finding,
            updated,
            caution: plan.caution,
        })
    }

    fn ensure_status(&self, proposal: &Proposal, transition: Transition) -> Result<(), LifecycleError> {
        if proposal.status != transition.required_status() {
            return Err(LifecycleError::InvalidTransition {
                transition,
                from: proposal.status,
            });
        }
        Ok(())
    }

    fn transition(&self, proposal: &mut Proposal, transition: Transition) -> Result<(), LifecycleError> {
        self.ensure_status(proposal, transition)?;
        let from = proposal.status;
        proposal.set_status(transition.target_status());

        tracing::info!(
            proposal_id = %proposal.id,
            from = %from,
            to = %proposal.status,
            "Proposal transitioned"
        );
        Ok(())
    }
}
