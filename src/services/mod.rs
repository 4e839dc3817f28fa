//! Service layer for canon-gate
//!
//! Wires the pure components over a [`crate::store::DocumentStore`] so the CLI
//! and embedding callers share one implementation of every governed operation.

pub mod governance_service;

pub use governance_service::{
    CreateDocumentInput, GovernanceError, GovernanceResult, GovernanceService, Readiness,
};
