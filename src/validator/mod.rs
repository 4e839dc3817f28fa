pub mod audit;
pub mod integrity;
pub mod report;
pub mod severity;

pub use audit::{audit_documents, AuditPass, AuditSummary, DocumentAudit};
pub use integrity::{check_integrity, GovernanceMismatch, GovernanceState, IntegrityChecker, IntegrityResult};
pub use report::generate_report;
pub use severity::{score, SeverityScorer};
