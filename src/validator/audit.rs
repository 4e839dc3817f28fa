use super::severity::SeverityScorer;
use crate::models::{AuditFinding, Document, Severity};
use crate::parser::content_checksum;
use serde::Serialize;
use std::collections::HashMap;

/// Finding for one document in an audit pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAudit {
    pub document_id: String,
    pub label: String,
    pub finding: AuditFinding,
}

/// Severity counts over an audit pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub ok: usize,
    pub warn: usize,
    pub fail: usize,
}

impl AuditSummary {
    pub fn from_audits(audits: &[DocumentAudit]) -> Self {
        let mut summary = Self::default();
        for audit in audits {
            match audit.finding.severity {
                Severity::Ok => summary.ok += 1,
                Severity::Warn => summary.warn += 1,
                Severity::Fail => summary.fail += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.ok + self.warn + self.fail
    }
}

/// One audit pass over a document set
///
/// Findings are cached by content checksum for the lifetime of the pass only,
/// so duplicated bodies are scored once. Drop the pass to forget the cache.
pub struct AuditPass<'a> {
    scorer: &'a SeverityScorer,
    cache: HashMap<String, AuditFinding>,
    hits: usize,
}

impl<'a> AuditPass<'a> {
    pub fn new(scorer: &'a SeverityScorer) -> Self {
        Self {
            scorer,
            cache: HashMap::new(),
            hits: 0,
        }
    }

    /// Score one document, reusing a cached finding for identical content
    pub fn score(&mut self, doc: &Document) -> AuditFinding {
        let Some(content) = doc.content.as_deref() else {
            return self.scorer.score(doc);
        };

        let key = content_checksum(content);
        if let Some(cached) = self.cache.get(&key) {
            self.hits += 1;
            // Flags are not part of the cache key
            return AuditFinding {
                governed: doc.governed,
                rag_ready: doc.rag_ready,
                ..cached.clone()
            };
        }

        let finding = self.scorer.score(doc);
        self.cache.insert(key, finding.clone());
        finding
    }

    /// Score every document, preserving input order
    pub fn run(mut self, documents: &[Document]) -> Vec<DocumentAudit> {
        let audits: Vec<DocumentAudit> = documents
            .iter()
            .map(|doc| DocumentAudit {
                document_id: doc.id.clone(),
                label: doc.label().to_string(),
                finding: self.score(doc),
            })
            .collect();

        tracing::debug!(
            documents = audits.len(),
            cache_hits = self.hits,
            "Audit pass complete"
        );

        audits
    }

    pub fn cache_hits(&self) -> usize {
        self.hits
    }
}

/// Audit a document set with a fresh pass
pub fn audit_documents(scorer: &SeverityScorer, documents: &[Document]) -> Vec<DocumentAudit> {
    AuditPass::new(scorer).run(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_content_hits_cache() {
        let scorer = SeverityScorer::default();
        let mut pass = AuditPass::new(&scorer);

        let a = Document::new("a").with_content("# Same\n\n- x\n").with_flags(true, false);
        let b = Document::new("b").with_content("# Same\n\n- x\n").with_flags(false, true);

        let fa = pass.score(&a);
        let fb = pass.score(&b);
        assert_eq!(pass.cache_hits(), 1);
        assert_eq!(fa.severity, fb.severity);
        assert!(fa.governed && !fa.rag_ready);
        assert!(!fb.governed && fb.rag_ready);
    }

    #[test]
    fn test_cached_result_matches_direct_scoring() {
        let scorer = SeverityScorer::default();
        let doc = Document::new("a").with_content("plain");
        let mut pass = AuditPass::new(&scorer);
        pass.score(&doc);
        assert_eq!(pass.score(&doc), scorer.score(&doc));
    }

    #[test]
    fn test_run_preserves_order_and_summarizes() {
        let scorer = SeverityScorer::default();
        let docs = vec![
            Document::new("1").with_key("A.md").with_content("# A\n\n- one\n"),
            Document::new("2").with_key("B.md").with_content("prose"),
            Document::new("3").with_title("C"),
        ];

        let audits = audit_documents(&scorer, &docs);
        let ids: Vec<_> = audits.iter().map(|a| a.document_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(audits[2].label, "C");

        let summary = AuditSummary::from_audits(&audits);
        assert_eq!(summary, AuditSummary { ok: 1, warn: 1, fail: 1 });
        assert_eq!(summary.total(), 3);
    }
}
