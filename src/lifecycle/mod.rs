//! Proposal Lifecycle Engine
//!
//! Owns the proposal state machine and the apply-time checks against the
//! target document's severity.

mod engine;
mod error;

pub use engine::{ApplyOutcome, ApplyPlan, LifecycleEngine};
pub use error::{LifecycleError, Transition};
