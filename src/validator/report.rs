//! Plain-text canon integrity report
//!
//! The layout is consumed verbatim by other tools. Section order, headings,
//! indentation and omission of empty sections must stay byte-for-byte stable.

use super::integrity::IntegrityResult;
use chrono::{DateTime, SecondsFormat, Utc};

pub const REPORT_TITLE: &str = "CANON INTEGRITY REPORT";
pub const MISSING_SECTION: &str = "MISSING DOCUMENTS:";
pub const WRONG_GOVERNANCE_SECTION: &str = "WRONG GOVERNANCE STATUS:";
pub const NOT_READY_SECTION: &str = "NOT READY FOR RAG:";
pub const SUCCESS_LINE: &str =
    "All canonical documents are present, governed, and ready for retrieval.";

/// Render an integrity result as a deterministic plain-text report
pub fn generate_report(result: &IntegrityResult, label: &str, timestamp: &DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str(REPORT_TITLE);
    out.push('\n');
    out.push_str(&format!("Label: {}\n", label));
    out.push_str(&format!(
        "Timestamp: {}\n",
        timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    out.push_str(&format!(
        "Status: {}\n",
        if result.passed { "PASSED" } else { "FAILED" }
    ));
    out.push('\n');

    if !result.missing_docs.is_empty() {
        out.push_str(MISSING_SECTION);
        out.push('\n');
        for key in &result.missing_docs {
            out.push_str(&format!("  - {}\n", key));
        }
        out.push('\n');
    }

    if !result.wrong_governance.is_empty() {
        out.push_str(WRONG_GOVERNANCE_SECTION);
        out.push('\n');
        for mismatch in &result.wrong_governance {
            out.push_str(&format!(
                "  - {} (expected: {}, actual: {})\n",
                mismatch.filename, mismatch.expected, mismatch.actual
            ));
        }
        out.push('\n');
    }

    if !result.not_ready_for_rag.is_empty() {
        out.push_str(NOT_READY_SECTION);
        out.push('\n');
        for key in &result.not_ready_for_rag {
            out.push_str(&format!("  - {}\n", key));
        }
        out.push('\n');
    }

    if result.passed {
        out.push_str(SUCCESS_LINE);
        out.push('\n');
    }

    // Exactly one trailing newline
    while out.ends_with("\n\n") {
        out.pop();
    }

    out
}
