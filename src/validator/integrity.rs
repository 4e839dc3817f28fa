use crate::models::{CanonManifest, Document};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Governance state as reported by the integrity check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GovernanceState {
    Governed,
    Ungoverned,
}

impl GovernanceState {
    pub fn name(&self) -> &'static str {
        match self {
            GovernanceState::Governed => "GOVERNED",
            GovernanceState::Ungoverned => "UNGOVERNED",
        }
    }
}

impl fmt::Display for GovernanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A canonical document whose governance flag is the opposite of what is required
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceMismatch {
    pub filename: String,
    pub expected: GovernanceState,
    pub actual: GovernanceState,
}

/// Outcome of a canon integrity check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityResult {
    pub passed: bool,
    pub missing_docs: Vec<String>,
    pub wrong_governance: Vec<GovernanceMismatch>,
    pub not_ready_for_rag: Vec<String>,
}

impl IntegrityResult {
    /// Flatten every failure into a human-readable reason, in report order
    pub fn failure_reasons(&self) -> Vec<String> {
        let mut reasons = Vec::new();
        for key in &self.missing_docs {
            reasons.push(format!("missing canonical document: {}", key));
        }
        for mismatch in &self.wrong_governance {
            reasons.push(format!(
                "{}: expected {}, actual {}",
                mismatch.filename, mismatch.expected, mismatch.actual
            ));
        }
        for key in &self.not_ready_for_rag {
            reasons.push(format!("{}: not ready for RAG", key));
        }
        reasons
    }
}

/// Checks a document set against the canon manifest
#[derive(Debug, Clone, Default)]
pub struct IntegrityChecker {
    manifest: CanonManifest,
}

impl IntegrityChecker {
    pub fn new(manifest: CanonManifest) -> Self {
        Self { manifest }
    }

    pub fn manifest(&self) -> &CanonManifest {
        &self.manifest
    }

    /// Run the check against the full current document set
    pub fn check(&self, documents: &[Document]) -> IntegrityResult {
        let mut missing_docs = Vec::new();
        let mut wrong_governance = Vec::new();
        let mut not_ready_for_rag = Vec::new();

        for key in &self.manifest.required {
            let Some(doc) = find_by_key(documents, key) else {
                missing_docs.push(key.clone());
                continue;
            };

            if !doc.governed {
                wrong_governance.push(GovernanceMismatch {
                    filename: key.clone(),
                    expected: GovernanceState::Governed,
                    actual: GovernanceState::Ungoverned,
                });
            }
            if !doc.rag_ready {
                not_ready_for_rag.push(key.clone());
            }
        }

        if let Some(scaffold) = &self.manifest.scaffold {
            if let Some(doc) = find_by_key(documents, scaffold) {
                if doc.governed {
                    wrong_governance.push(GovernanceMismatch {
                        filename: scaffold.clone(),
                        expected: GovernanceState::Ungoverned,
                        actual: GovernanceState::Governed,
                    });
                }
            }
        }

        let passed =
            missing_docs.is_empty() && wrong_governance.is_empty() && not_ready_for_rag.is_empty();

        tracing::debug!(
            documents = documents.len(),
            missing = missing_docs.len(),
            wrong_governance = wrong_governance.len(),
            not_ready = not_ready_for_rag.len(),
            passed,
            "Checked canon integrity"
        );

        IntegrityResult {
            passed,
            missing_docs,
            wrong_governance,
            not_ready_for_rag,
        }
    }
}

/// First document answering to a manifest key, in input order
fn find_by_key<'a>(documents: &'a [Document], key: &str) -> Option<&'a Document> {
    documents.iter().find(|d| d.matches_key(key))
}

/// Check a document set against the default manifest
pub fn check_integrity(documents: &[Document]) -> IntegrityResult {
    IntegrityChecker::default().check(documents)
}
