// canon-gate - Governance and content-integrity engine
// Severity scoring, canon integrity checks, proposal lifecycle and action gating

pub mod cli;
pub mod gate;
pub mod lifecycle;
pub mod models;
pub mod parser;
pub mod services;
pub mod store;
pub mod validator;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use gate::{check_allowed, GovernedAction, Refusal, RefusalCode, SystemMode};
pub use lifecycle::{LifecycleEngine, LifecycleError};
pub use models::{AuditFinding, CanonConfig, Document, Proposal, ProposalStatus, Severity};
pub use parser::{extract_apply_action, ExtractionError};
pub use services::{GovernanceError, GovernanceService};
pub use store::{DocumentStore, JsonFileStore, MemoryStore, StoreError};
pub use validator::{check_integrity, generate_report, score, IntegrityResult};
