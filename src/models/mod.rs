pub mod action;
pub mod config;
pub mod document;
pub mod proposal;
pub mod severity;

pub use action::{CanonicalDocumentUpdate, ProposalAction, ResolvedAction, CANONICAL_DOCUMENT_UPDATE};
pub use config::{ApplyPolicy, CanonConfig, CanonManifest, ScoringRules, CONFIG_PATH};
pub use document::{Document, DocumentPatch};
pub use proposal::{Proposal, ProposalPatch, ProposalStatus};
pub use severity::{AuditFinding, Severity};
