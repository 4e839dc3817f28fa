use super::{DocumentStore, Snapshot, StoreResult};
use crate::models::{Document, DocumentPatch, Proposal};

/// In-memory store
///
/// `omit_content` mimics a remote list view that leaves `content` out, so
/// callers exercise the per-id fetch path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Snapshot,
    omit_content: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            snapshot: Snapshot {
                documents,
                proposals: Vec::new(),
            },
            omit_content: false,
        }
    }

    pub fn omit_content_in_lists(mut self, omit: bool) -> Self {
        self.omit_content = omit;
        self
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

impl DocumentStore for MemoryStore {
    fn list_documents(&self) -> StoreResult<Vec<Document>> {
        let mut docs = self.snapshot.documents.clone();
        if self.omit_content {
            for doc in &mut docs {
                doc.content = None;
            }
        }
        Ok(docs)
    }

    fn get_document(&self, id: &str) -> StoreResult<Document> {
        self.snapshot.document(id)
    }

    fn patch_document(&mut self, id: &str, patch: &DocumentPatch) -> StoreResult<Document> {
        self.snapshot.patch_document(id, patch)
    }

    fn insert_document(&mut self, document: Document) -> StoreResult<Document> {
        self.snapshot.insert_document(document)
    }

    fn list_proposals(&self) -> StoreResult<Vec<Proposal>> {
        Ok(self.snapshot.proposals.clone())
    }

    fn get_proposal(&self, id: &str) -> StoreResult<Proposal> {
        self.snapshot.proposal(id)
    }

    fn save_proposal(&mut self, proposal: &Proposal) -> StoreResult<Proposal> {
        Ok(self.snapshot.save_proposal(proposal))
    }
}
