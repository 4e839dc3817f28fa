//! Governance service - wires gate, integrity check and lifecycle over a store

use crate::gate::{check_allowed, GovernedAction, Refusal, SystemMode};
use crate::lifecycle::{ApplyOutcome, LifecycleEngine, LifecycleError};
use crate::models::{CanonConfig, Document, DocumentPatch, Proposal, ProposalPatch, ResolvedAction};
use crate::parser::ExtractionError;
use crate::store::{hydrate, DocumentStore, StoreError};
use crate::validator::{
    audit_documents, DocumentAudit, IntegrityChecker, IntegrityResult, SeverityScorer,
};

/// Errors from governed operations
#[derive(Debug, thiserror::Error)]
pub enum GovernanceError {
    /// Not allowed right now
    #[error(transparent)]
    Refused(#[from] Refusal),

    /// Invalid state or payload
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type GovernanceResult<T> = Result<T, GovernanceError>;

/// Input for creating a canonical document
#[derive(Debug, Clone)]
pub struct CreateDocumentInput {
    pub id: Option<String>,
    pub key: String,
    pub title: Option<String>,
    pub content: String,
}

/// Readiness derived from a fresh integrity check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readiness {
    pub mode: SystemMode,
    pub integrity: IntegrityResult,
}

impl Readiness {
    pub fn reasons(&self) -> Vec<String> {
        self.integrity.failure_reasons()
    }
}

/// Governance operations over a store
pub struct GovernanceService<S: DocumentStore> {
    store: S,
    scorer: SeverityScorer,
    checker: IntegrityChecker,
    engine: LifecycleEngine,
    operator_override: bool,
}

impl<S: DocumentStore> GovernanceService<S> {
    pub fn new(store: S, config: &CanonConfig) -> Self {
        let scorer = SeverityScorer::new(config.scoring.clone());
        Self {
            store,
            checker: IntegrityChecker::new(config.manifest.clone()),
            engine: LifecycleEngine::new(scorer.clone(), config.apply),
            scorer,
            operator_override: false,
        }
    }

    /// Let a human operator run governed actions while GUARDED
    ///
    /// Refusals are still computed and logged, but not returned.
    pub fn operator_override(mut self, enabled: bool) -> Self {
        self.operator_override = enabled;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // =========================================================================
    // Read-only checks
    // =========================================================================

    /// Full current document set with content fetched where the list omitted it
    pub fn snapshot(&self) -> GovernanceResult<Vec<Document>> {
        let listed = self.store.list_documents()?;
        Ok(hydrate(&self.store, listed)?)
    }

    /// Canon integrity, always against a fresh snapshot
    pub fn integrity(&self) -> GovernanceResult<IntegrityResult> {
        let documents = self.store.list_documents()?;
        Ok(self.checker.check(&documents))
    }

    pub fn readiness(&self) -> GovernanceResult<Readiness> {
        let integrity = self.integrity()?;
        Ok(Readiness {
            mode: SystemMode::from_integrity(&integrity),
            integrity,
        })
    }

    pub fn mode(&self) -> GovernanceResult<SystemMode> {
        Ok(self.readiness()?.mode)
    }

    /// Score every document in a single audit pass
    pub fn audit(&self) -> GovernanceResult<Vec<DocumentAudit>> {
        let documents = self.snapshot()?;
        Ok(audit_documents(&self.scorer, &documents))
    }

    /// Consult the gate for an action, with integrity failures as reasons
    pub fn guard(&self, action: GovernedAction) -> GovernanceResult<()> {
        let readiness = self.readiness()?;
        match check_allowed(readiness.mode, action, &readiness.reasons()) {
            None => Ok(()),
            Some(refusal) if self.operator_override => {
                tracing::warn!(
                    action = %action,
                    reasons = refusal.reasons.len(),
                    "Governed action allowed by operator override"
                );
                Ok(())
            }
            Some(refusal) => {
                tracing::warn!(
                    action = %action,
                    reasons = refusal.reasons.len(),
                    "Governed action refused"
                );
                Err(refusal.into())
            }
        }
    }

    // =========================================================================
    // Gated document operations
    // =========================================================================

    pub fn create_canonical_document(&mut self, input: CreateDocumentInput) -> GovernanceResult<Document> {
        self.guard(GovernedAction::CreateCanonicalDocument)?;

        let id = input
            .id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let mut doc = Document::new(id).with_key(input.key).with_content(input.content);
        doc.title = input.title;

        let created = self.store.insert_document(doc)?;
        tracing::info!(document_id = %created.id, key = %created.label(), "Created canonical document");
        Ok(created)
    }

    pub fn set_governed(&mut self, document_id: &str, governed: bool) -> GovernanceResult<Document> {
        self.guard(GovernedAction::UpdateGovernance)?;
        let updated = self
            .store
            .patch_document(document_id, &DocumentPatch::governed(governed))?;
        tracing::info!(document_id, governed, "Updated governance flag");
        Ok(updated)
    }

    pub fn set_rag_ready(&mut self, document_id: &str, rag_ready: bool) -> GovernanceResult<Document> {
        self.guard(GovernedAction::UpdateRagReadiness)?;
        let updated = self
            .store
            .patch_document(document_id, &DocumentPatch::rag_ready(rag_ready))?;
        tracing::info!(document_id, rag_ready, "Updated RAG readiness");
        Ok(updated)
    }

    // =========================================================================
    // Proposal workflow
    // =========================================================================

    /// Create a proposal in DRAFT
    pub fn create_proposal(&mut self, title: &str, content: &str) -> GovernanceResult<Proposal> {
        let proposal = Proposal::new(uuid::Uuid::new_v4().to_string(), title, content);
        let saved = self.store.save_proposal(&proposal)?;
        tracing::info!(proposal_id = %saved.id, "Created proposal");
        Ok(saved)
    }

    pub fn list_proposals(&self) -> GovernanceResult<Vec<Proposal>> {
        Ok(self.store.list_proposals()?)
    }

    pub fn get_proposal(&self, proposal_id: &str) -> GovernanceResult<Proposal> {
        Ok(self.store.get_proposal(proposal_id)?)
    }

    pub fn submit(&mut self, proposal_id: &str) -> GovernanceResult<Proposal> {
        self.update_proposal(proposal_id, |engine, p| engine.submit(p))
    }

    pub fn approve(&mut self, proposal_id: &str) -> GovernanceResult<Proposal> {
        self.update_proposal(proposal_id, |engine, p| engine.approve(p))
    }

    pub fn reject(&mut self, proposal_id: &str, reason: Option<String>) -> GovernanceResult<Proposal> {
        self.update_proposal(proposal_id, |engine, p| engine.reject(p, reason))
    }

    pub fn edit(&mut self, proposal_id: &str, patch: &ProposalPatch) -> GovernanceResult<Proposal> {
        self.update_proposal(proposal_id, |engine, p| engine.edit(p, patch))
    }

    /// Apply preview for the proposal's current content
    pub fn preview(&self, proposal_id: &str) -> GovernanceResult<Result<ResolvedAction, ExtractionError>> {
        let proposal = self.store.get_proposal(proposal_id)?;
        Ok(self.engine.preview(&proposal))
    }

    /// Gate, validate and execute an approved proposal
    ///
    /// The target document is persisted before the proposal, so a store
    /// failure never leaves an APPLIED proposal without its update.
    pub fn apply(&mut self, proposal_id: &str) -> GovernanceResult<(Proposal, ApplyOutcome)> {
        self.guard(GovernedAction::ApplyProposal)?;

        let mut proposal = self.store.get_proposal(proposal_id)?;
        let plan = self.engine.plan_apply(&proposal, &self.snapshot()?)?;

        let mut target = self.store.get_document(&plan.target_document_id)?;
        let outcome = self
            .engine
            .apply(&mut proposal, std::slice::from_mut(&mut target))?;

        self.store.patch_document(
            &outcome.target_document_id,
            &DocumentPatch {
                content: target.content.clone(),
                ..DocumentPatch::default()
            },
        )?;
        let saved = self.store.save_proposal(&proposal)?;

        if let Some(caution) = &outcome.caution {
            tracing::warn!(proposal_id, caution = %caution, "Applied onto WARN target");
        }

        Ok((saved, outcome))
    }

    fn update_proposal<F>(&mut self, proposal_id: &str, op: F) -> GovernanceResult<Proposal>
    where
        F: FnOnce(&LifecycleEngine, &mut Proposal) -> Result<(), LifecycleError>,
    {
        let mut proposal = self.store.get_proposal(proposal_id)?;
        op(&self.engine, &mut proposal)?;
        Ok(self.store.save_proposal(&proposal)?)
    }
}
