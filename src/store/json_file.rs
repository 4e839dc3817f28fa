use super::{DocumentStore, Snapshot, StoreResult};
use crate::models::{Document, DocumentPatch, Proposal};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// JSON snapshot file acting as the store
///
/// Every mutation rewrites the file atomically. A missing file is an empty store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    snapshot: Snapshot,
}

impl JsonFileStore {
    /// Load the store, treating a missing file as empty
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let snapshot = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Snapshot::default()
        };

        tracing::debug!(
            path = %path.display(),
            documents = snapshot.documents.len(),
            proposals = snapshot.proposals.len(),
            "Opened store"
        );

        Ok(Self { path, snapshot })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the snapshot using atomic write
    ///
    /// Writes to a temporary file in the same directory, then persists it over
    /// the target so readers never see a half-written file.
    pub fn save(&self) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(&self.snapshot)?;

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let mut temp_file = NamedTempFile::new_in(&parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(&self.path).map_err(|e| e.error)?;

        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    fn list_documents(&self) -> StoreResult<Vec<Document>> {
        Ok(self.snapshot.documents.clone())
    }

    fn get_document(&self, id: &str) -> StoreResult<Document> {
        self.snapshot.document(id)
    }

    fn patch_document(&mut self, id: &str, patch: &DocumentPatch) -> StoreResult<Document> {
        let updated = self.snapshot.patch_document(id, patch)?;
        self.save()?;
        Ok(updated)
    }

    fn insert_document(&mut self, document: Document) -> StoreResult<Document> {
        let inserted = self.snapshot.insert_document(document)?;
        self.save()?;
        Ok(inserted)
    }

    fn list_proposals(&self) -> StoreResult<Vec<Proposal>> {
        Ok(self.snapshot.proposals.clone())
    }

    fn get_proposal(&self, id: &str) -> StoreResult<Proposal> {
        self.snapshot.proposal(id)
    }

    fn save_proposal(&mut self, proposal: &Proposal) -> StoreResult<Proposal> {
        let saved = self.snapshot.save_proposal(proposal);
        self.save()?;
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_store() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp.path().join("canon/store.json")).unwrap();
        assert!(store.list_documents().unwrap().is_empty());
        assert!(store.list_proposals().unwrap().is_empty());
    }

    #[test]
    fn test_mutations_persist_across_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("canon/store.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store
            .insert_document(Document::new("1").with_key("CANON.md").with_content("# Canon"))
            .unwrap();
        store.patch_document("1", &DocumentPatch::governed(true)).unwrap();
        store.save_proposal(&Proposal::new("p-1", "Title", "Body")).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        let doc = reopened.get_document("1").unwrap();
        assert!(doc.governed);
        assert_eq!(doc.content.as_deref(), Some("# Canon"));
        assert_eq!(reopened.get_proposal("p-1").unwrap().title, "Title");
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("store.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path).unwrap_err(),
            crate::store::StoreError::Serde(_)
        ));
    }

    #[test]
    fn test_wire_format_uses_camel_case() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("store.json");
        let mut store = JsonFileStore::open(&path).unwrap();
        store
            .insert_document(Document::new("1").with_flags(true, true))
            .unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"ragReady\": true"));
        assert!(raw.contains("\"governed\": true"));
    }
}
