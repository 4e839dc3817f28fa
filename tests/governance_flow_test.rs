use canon_gate::cli::Project;
use canon_gate::models::{CanonConfig, Document, ProposalStatus};
use canon_gate::services::{CreateDocumentInput, GovernanceError};
use canon_gate::{
    check_integrity, generate_report, score, DocumentStore, GovernedAction, JsonFileStore,
    LifecycleError, RefusalCode, Severity, SystemMode,
};
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

const REQUIRED: [&str; 4] = ["CANON.md", "GOVERNANCE.md", "ARCHITECTURE.md", "GLOSSARY.md"];
const HEALTHY: &str = "# Canon\n\n## Principles\n\n- one\n- two\n- three\n";

fn action_block(target: &str, content: &str) -> String {
    format!(
        "Replace the canon body.\n\n```json\n{}\n```\n",
        serde_json::json!({"actions": [{
            "type": "CANONICAL_DOCUMENT_UPDATE",
            "targetDocumentId": target,
            "newContent": content,
        }]})
    )
}

/// Bootstrap a file-backed project whose canon passes integrity
fn governed_project(temp: &TempDir) -> Project {
    CanonConfig::default().save(temp.path()).unwrap();
    let mut project = Project::open_at(temp.path(), true).unwrap();

    for key in REQUIRED {
        let doc = project
            .service
            .create_canonical_document(CreateDocumentInput {
                id: Some(key.to_lowercase()),
                key: key.to_string(),
                title: None,
                content: HEALTHY.to_string(),
            })
            .unwrap();
        project.service.set_governed(&doc.id, true).unwrap();
        project.service.set_rag_ready(&doc.id, true).unwrap();
    }

    // Reopen without the override, as a regular caller would
    Project::open_at(temp.path(), false).unwrap()
}

#[test]
fn test_empty_present_document_scenario() {
    let empty = Document::new("g")
        .with_key("GOVERNANCE.md")
        .with_content("")
        .with_flags(false, false);
    assert_eq!(score(&empty).severity, Severity::Fail);

    let mut docs: Vec<Document> = REQUIRED
        .iter()
        .filter(|k| **k != "GOVERNANCE.md")
        .map(|k| {
            Document::new(*k)
                .with_key(*k)
                .with_content(HEALTHY)
                .with_flags(true, true)
        })
        .collect();
    docs.push(empty);

    let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let present = generate_report(&check_integrity(&docs), "scenario", &ts);
    assert!(present.contains("Status: FAILED\n"));
    assert!(present.contains(
        "WRONG GOVERNANCE STATUS:\n  - GOVERNANCE.md (expected: GOVERNED, actual: UNGOVERNED)\n"
    ));
    assert!(present.contains("NOT READY FOR RAG:\n  - GOVERNANCE.md\n"));
    assert!(!present.contains("MISSING DOCUMENTS:"));

    docs.retain(|d| d.id != "g");
    let absent = generate_report(&check_integrity(&docs), "scenario", &ts);
    assert!(absent.contains("MISSING DOCUMENTS:\n  - GOVERNANCE.md\n"));
    assert!(!absent.contains("WRONG GOVERNANCE STATUS:"));
    assert!(!absent.contains("NOT READY FOR RAG:"));
}

#[test]
fn test_fresh_project_is_guarded() {
    let temp = TempDir::new().unwrap();
    let mut project = Project::open_at(temp.path(), false).unwrap();

    assert_eq!(project.service.mode().unwrap(), SystemMode::Guarded);

    let err = project
        .service
        .create_canonical_document(CreateDocumentInput {
            id: None,
            key: "CANON.md".to_string(),
            title: None,
            content: HEALTHY.to_string(),
        })
        .unwrap_err();
    match err {
        GovernanceError::Refused(refusal) => {
            assert_eq!(refusal.code, RefusalCode::NotReady);
            for key in REQUIRED {
                assert!(refusal.message.contains(&format!("missing canonical document: {}", key)));
            }
        }
        other => panic!("expected refusal, got {:?}", other),
    }
}

#[test]
fn test_proposal_lifecycle_persists_through_file_store() {
    let temp = TempDir::new().unwrap();
    let mut project = governed_project(&temp);
    assert_eq!(project.service.mode().unwrap(), SystemMode::Governed);

    let new_body = "# Canon v2\n\n## Principles\n\n- only one\n- and two\n";
    let proposal = project
        .service
        .create_proposal("Rewrite canon", &action_block("canon.md", new_body))
        .unwrap();
    project.service.submit(&proposal.id).unwrap();
    project.service.approve(&proposal.id).unwrap();
    let (applied, outcome) = project.service.apply(&proposal.id).unwrap();
    assert_eq!(applied.status, ProposalStatus::Applied);
    assert_eq!(outcome.updated.severity, Severity::Ok);

    let config = CanonConfig::load(temp.path()).unwrap();
    let store = JsonFileStore::open(config.resolve_store_path(temp.path())).unwrap();
    assert_eq!(
        store.get_document("canon.md").unwrap().content.as_deref(),
        Some(new_body)
    );
    assert_eq!(
        store.get_proposal(&proposal.id).unwrap().status,
        ProposalStatus::Applied
    );

    // Terminal: repeating the transition fails cleanly
    let err = project.service.apply(&proposal.id).unwrap_err();
    assert!(matches!(
        err,
        GovernanceError::Lifecycle(LifecycleError::InvalidTransition { .. })
    ));
}

#[test]
fn test_apply_refused_when_canon_degrades() {
    let temp = TempDir::new().unwrap();
    let mut project = governed_project(&temp);

    let proposal = project
        .service
        .create_proposal("t", &action_block("glossary.md", HEALTHY))
        .unwrap();
    project.service.submit(&proposal.id).unwrap();
    project.service.approve(&proposal.id).unwrap();

    // Flip a flag underneath the service, as another client would
    let config = CanonConfig::load(temp.path()).unwrap();
    let mut store = JsonFileStore::open(config.resolve_store_path(temp.path())).unwrap();
    store
        .patch_document(
            "architecture.md",
            &canon_gate::models::DocumentPatch::rag_ready(false),
        )
        .unwrap();

    let mut project = Project::open_at(temp.path(), false).unwrap();
    match project.service.apply(&proposal.id).unwrap_err() {
        GovernanceError::Refused(refusal) => {
            assert_eq!(refusal.action, GovernedAction::ApplyProposal);
            assert!(refusal.message.contains("ARCHITECTURE.md: not ready for RAG"));
        }
        other => panic!("expected refusal, got {:?}", other),
    }
    assert_eq!(
        project.service.get_proposal(&proposal.id).unwrap().status,
        ProposalStatus::Approved
    );
}

#[test]
fn test_apply_onto_failing_target_keeps_proposal_approved() {
    let temp = TempDir::new().unwrap();
    governed_project(&temp);

    // A non-canonical blank document is FAIL but does not affect integrity
    let config = CanonConfig::load(temp.path()).unwrap();
    let mut store = JsonFileStore::open(config.resolve_store_path(temp.path())).unwrap();
    store
        .insert_document(Document::new("notes").with_key("NOTES.md").with_content("   "))
        .unwrap();
    let mut project = Project::open_at(temp.path(), false).unwrap();

    let proposal = project
        .service
        .create_proposal("t", &action_block("notes", HEALTHY))
        .unwrap();
    project.service.submit(&proposal.id).unwrap();
    project.service.approve(&proposal.id).unwrap();

    match project.service.apply(&proposal.id).unwrap_err() {
        GovernanceError::Lifecycle(LifecycleError::TargetSeverity { severity, .. }) => {
            assert_eq!(severity, Severity::Fail);
        }
        other => panic!("expected severity block, got {:?}", other),
    }
    assert_eq!(
        project.service.get_proposal(&proposal.id).unwrap().status,
        ProposalStatus::Approved
    );
    assert_eq!(
        project.service.store().get_document("notes").unwrap().content.as_deref(),
        Some("   ")
    );
}
