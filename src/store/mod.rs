//! Store contract
//!
//! The engine never owns persistence. Callers fetch snapshots through a
//! [`DocumentStore`] and persist results through it afterwards.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::models::{Document, DocumentPatch, Proposal};
use serde::{Deserialize, Serialize};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by a store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// 404-equivalent
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Any other non-success response, message surfaced verbatim
    #[error("{0}")]
    Remote(String),

    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl StoreError {
    pub fn document_not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind: "document",
            id: id.into(),
        }
    }

    pub fn proposal_not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind: "proposal",
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Request/response access to documents and proposals
pub trait DocumentStore {
    /// List documents; implementations may omit `content`
    fn list_documents(&self) -> StoreResult<Vec<Document>>;

    fn get_document(&self, id: &str) -> StoreResult<Document>;

    /// Apply a partial update and return the updated record
    fn patch_document(&mut self, id: &str, patch: &DocumentPatch) -> StoreResult<Document>;

    fn insert_document(&mut self, document: Document) -> StoreResult<Document>;

    fn list_proposals(&self) -> StoreResult<Vec<Proposal>>;

    fn get_proposal(&self, id: &str) -> StoreResult<Proposal>;

    /// Insert or replace a proposal
    fn save_proposal(&mut self, proposal: &Proposal) -> StoreResult<Proposal>;
}

/// Fill in content omitted by a list view, fetching per id
pub fn hydrate<S: DocumentStore + ?Sized>(store: &S, documents: Vec<Document>) -> StoreResult<Vec<Document>> {
    documents
        .into_iter()
        .map(|doc| {
            if doc.content.is_some() {
                Ok(doc)
            } else {
                tracing::debug!(document_id = %doc.id, "Fetching content omitted from list view");
                store.get_document(&doc.id)
            }
        })
        .collect()
}

/// Serialized store contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub proposals: Vec<Proposal>,
}

impl Snapshot {
    pub(crate) fn document(&self, id: &str) -> StoreResult<Document> {
        self.documents
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| StoreError::document_not_found(id))
    }

    pub(crate) fn patch_document(&mut self, id: &str, patch: &DocumentPatch) -> StoreResult<Document> {
        let doc = self
            .documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| StoreError::document_not_found(id))?;
        doc.apply_patch(patch);
        Ok(doc.clone())
    }

    pub(crate) fn insert_document(&mut self, document: Document) -> StoreResult<Document> {
        if self.documents.iter().any(|d| d.id == document.id) {
            return Err(StoreError::Remote(format!(
                "document already exists: {}",
                document.id
            )));
        }
        self.documents.push(document.clone());
        Ok(document)
    }

    pub(crate) fn proposal(&self, id: &str) -> StoreResult<Proposal> {
        self.proposals
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::proposal_not_found(id))
    }

    pub(crate) fn save_proposal(&mut self, proposal: &Proposal) -> Proposal {
        match self.proposals.iter_mut().find(|p| p.id == proposal.id) {
            Some(existing) => *existing = proposal.clone(),
            None => self.proposals.push(proposal.clone()),
        }
        proposal.clone()
    }
}
