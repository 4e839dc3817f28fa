use serde::{Deserialize, Serialize};
use std::fmt;

/// Health verdict for a document's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Content is structured well enough to be trusted
    Ok,
    /// Content exists but is poorly structured
    Warn,
    /// Content is empty or missing
    Fail,
}

impl Severity {
    /// Get display symbol for severity
    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Ok => "🟢",
            Severity::Warn => "🟡",
            Severity::Fail => "🔴",
        }
    }

    /// Get display name for severity
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warn => "WARN",
            Severity::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of scoring a single document snapshot
///
/// Never stored alongside the document: it is recomputed from the current
/// content every time it is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditFinding {
    pub severity: Severity,
    /// Human-readable defects, empty when severity is OK
    pub reasons: Vec<String>,
    /// Raw character count of the content (0 if absent)
    pub content_length: usize,
    /// Structural markdown score on a 0..=10 scale
    pub markdown_score: u32,
    /// Surfaced for display, not an input to severity
    pub governed: bool,
    /// Surfaced for display, not an input to severity
    pub rag_ready: bool,
}

impl AuditFinding {
    pub fn is_ok(&self) -> bool {
        self.severity == Severity::Ok
    }

    pub fn is_fail(&self) -> bool {
        self.severity == Severity::Fail
    }

    /// Format finding for display
    pub fn format(&self) -> String {
        if self.reasons.is_empty() {
            format!(
                "{} [{}] score {}/10, {} chars",
                self.severity.symbol(),
                self.severity.name(),
                self.markdown_score,
                self.content_length
            )
        } else {
            format!(
                "{} [{}] score {}/10, {} chars - {}",
                self.severity.symbol(),
                self.severity.name(),
                self.markdown_score,
                self.content_length,
                self.reasons.join("; ")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Ok < Severity::Warn);
        assert!(Severity::Warn < Severity::Fail);
    }

    #[test]
    fn test_severity_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Severity::Warn).unwrap(), "\"WARN\"");
        let parsed: Severity = serde_json::from_str("\"FAIL\"").unwrap();
        assert_eq!(parsed, Severity::Fail);
    }

    #[test]
    fn test_finding_format_includes_reasons() {
        let finding = AuditFinding {
            severity: Severity::Warn,
            reasons: vec!["no headings".to_string(), "no lists".to_string()],
            content_length: 12,
            markdown_score: 0,
            governed: false,
            rag_ready: false,
        };
        let text = finding.format();
        assert!(text.contains("[WARN]"));
        assert!(text.contains("no headings; no lists"));
    }
}
