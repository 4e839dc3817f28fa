//! Action Gate
//!
//! Stateless policy consulted before any governed mutation. The system mode is
//! always passed in explicitly; nothing here reads ambient state.

use crate::validator::IntegrityResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// System-wide readiness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SystemMode {
    /// Canon is intact, governed actions may run
    Governed,
    /// Canon integrity is failing, governed actions are refused
    Guarded,
}

impl SystemMode {
    /// Derive the mode from a fresh integrity result
    pub fn from_integrity(result: &IntegrityResult) -> Self {
        if result.passed {
            SystemMode::Governed
        } else {
            SystemMode::Guarded
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SystemMode::Governed => "GOVERNED",
            SystemMode::Guarded => "GUARDED",
        }
    }
}

impl fmt::Display for SystemMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed set of governance-sensitive operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GovernedAction {
    CreateCanonicalDocument,
    UpdateGovernance,
    UpdateRagReadiness,
    ApplyProposal,
    SchemaChange,
}

impl GovernedAction {
    pub const ALL: [GovernedAction; 5] = [
        GovernedAction::CreateCanonicalDocument,
        GovernedAction::UpdateGovernance,
        GovernedAction::UpdateRagReadiness,
        GovernedAction::ApplyProposal,
        GovernedAction::SchemaChange,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GovernedAction::CreateCanonicalDocument => "CREATE_CANONICAL_DOCUMENT",
            GovernedAction::UpdateGovernance => "UPDATE_GOVERNANCE",
            GovernedAction::UpdateRagReadiness => "UPDATE_RAG_READINESS",
            GovernedAction::ApplyProposal => "APPLY_PROPOSAL",
            GovernedAction::SchemaChange => "SCHEMA_CHANGE",
        }
    }
}

impl fmt::Display for GovernedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown governed action: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for GovernedAction {
    type Err = UnknownAction;

    /// Only exact names from the closed list are accepted (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_uppercase();
        GovernedAction::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// Machine-checkable refusal code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefusalCode {
    NotReady,
}

impl RefusalCode {
    pub fn name(&self) -> &'static str {
        match self {
            RefusalCode::NotReady => "NOT_READY",
        }
    }
}

/// "Not allowed right now", as opposed to "failed"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct Refusal {
    pub code: RefusalCode,
    pub action: GovernedAction,
    pub reasons: Vec<String>,
    pub message: String,
}

/// Decide whether a governed action may run in the given mode
///
/// Returns `None` when allowed. In GUARDED mode every governed action is
/// refused; supplied reasons are enumerated in the message.
pub fn check_allowed(mode: SystemMode, action: GovernedAction, reasons: &[String]) -> Option<Refusal> {
    match mode {
        SystemMode::Governed => None,
        SystemMode::Guarded => {
            let message = if reasons.is_empty() {
                format!(
                    "{} refused: system is GUARDED (not ready). Run the canon integrity check and resolve its failures first.",
                    action
                )
            } else {
                let listed = reasons
                    .iter()
                    .enumerate()
                    .map(|(i, r)| format!("  {}. {}", i + 1, r))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!(
                    "{} refused: system is GUARDED (not ready). Canon integrity failures:\n{}",
                    action, listed
                )
            };

            Some(Refusal {
                code: RefusalCode::NotReady,
                action,
                reasons: reasons.to_vec(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_governed_mode_allows_everything() {
        for action in GovernedAction::ALL {
            assert_eq!(check_allowed(SystemMode::Governed, action, &[]), None);
            assert_eq!(
                check_allowed(SystemMode::Governed, action, &["ignored".to_string()]),
                None
            );
        }
    }

    #[test]
    fn test_guarded_mode_refuses_with_every_reason() {
        let reasons = vec![
            "missing canonical document: CANON.md".to_string(),
            "GLOSSARY.md: not ready for RAG".to_string(),
        ];
        for action in GovernedAction::ALL {
            let refusal = check_allowed(SystemMode::Guarded, action, &reasons).unwrap();
            assert_eq!(refusal.code, RefusalCode::NotReady);
            assert_eq!(refusal.action, action);
            assert_eq!(refusal.reasons, reasons);
            for reason in &reasons {
                assert!(refusal.message.contains(reason.as_str()));
            }
            assert!(refusal.message.contains("  1. missing canonical document: CANON.md"));
            assert!(refusal.message.contains("  2. GLOSSARY.md: not ready for RAG"));
        }
    }

    #[test]
    fn test_guarded_without_reasons_is_generic() {
        let refusal = check_allowed(SystemMode::Guarded, GovernedAction::SchemaChange, &[]).unwrap();
        assert_eq!(refusal.code, RefusalCode::NotReady);
        assert!(refusal.reasons.is_empty());
        assert!(refusal.message.starts_with("SCHEMA_CHANGE refused"));
        assert!(refusal.message.contains("integrity check"));
    }

    #[test]
    fn test_verdict_is_pure() {
        let reasons = vec!["x".to_string()];
        assert_eq!(
            check_allowed(SystemMode::Guarded, GovernedAction::ApplyProposal, &reasons),
            check_allowed(SystemMode::Guarded, GovernedAction::ApplyProposal, &reasons)
        );
    }

    #[test]
    fn test_action_parsing_is_closed() {
        assert_eq!(
            "UPDATE_GOVERNANCE".parse::<GovernedAction>().unwrap(),
            GovernedAction::UpdateGovernance
        );
        assert_eq!(
            "create-canonical-document".parse::<GovernedAction>().unwrap(),
            GovernedAction::CreateCanonicalDocument
        );
        assert!("DELETE_EVERYTHING".parse::<GovernedAction>().is_err());
        assert!("".parse::<GovernedAction>().is_err());
    }

    #[test]
    fn test_mode_from_integrity() {
        let passed = IntegrityResult {
            passed: true,
            missing_docs: vec![],
            wrong_governance: vec![],
            not_ready_for_rag: vec![],
        };
        let failed = IntegrityResult {
            passed: false,
            missing_docs: vec!["CANON.md".to_string()],
            ..passed.clone()
        };
        assert_eq!(SystemMode::from_integrity(&passed), SystemMode::Governed);
        assert_eq!(SystemMode::from_integrity(&failed), SystemMode::Guarded);
    }

    #[test]
    fn test_refusal_wire_format() {
        let refusal = check_allowed(SystemMode::Guarded, GovernedAction::UpdateRagReadiness, &[]).unwrap();
        let json = serde_json::to_value(&refusal).unwrap();
        assert_eq!(json["code"], "NOT_READY");
        assert_eq!(json["action"], "UPDATE_RAG_READINESS");
    }
}
