use crate::models::{CanonConfig, Document};
use crate::validator::{AuditPass, AuditSummary, DocumentAudit, SeverityScorer};
use crate::Result;
use colored::Colorize;
use std::env;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Score a markdown file, or every `.md` file under a directory
pub fn run(path: &Path, json: bool) -> Result<()> {
    let project_root = env::current_dir()?;
    let config = CanonConfig::load(&project_root)?;
    let scorer = SeverityScorer::new(config.scoring);

    let audits = score_path(&scorer, path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&audits)?);
        return Ok(());
    }

    for audit in &audits {
        println!("{}  {}", audit.finding.format(), audit.label.bold());
    }
    print_summary(&AuditSummary::from_audits(&audits));
    Ok(())
}

/// Score files in path order; content is read as-is
pub fn score_path(scorer: &SeverityScorer, path: &Path) -> Result<Vec<DocumentAudit>> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let documents = markdown_files(path)?
        .into_iter()
        .map(|file| -> Result<Document> {
            let content = std::fs::read_to_string(&file)?;
            let label = file.display().to_string();
            Ok(Document::new(label.clone()).with_key(label).with_content(content))
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(path = %path.display(), files = documents.len(), "Scoring markdown files");
    Ok(AuditPass::new(scorer).run(&documents))
}

fn markdown_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        let is_md = entry.path().extension().map(|e| e == "md").unwrap_or(false);
        if entry.file_type().is_file() && is_md {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

pub(crate) fn print_summary(summary: &AuditSummary) {
    println!();
    println!(
        "{} {}  {} {}  {} {}  ({} total)",
        "OK".green(),
        summary.ok,
        "WARN".yellow(),
        summary.warn,
        "FAIL".red(),
        summary.fail,
        summary.total()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use tempfile::TempDir;

    #[test]
    fn test_score_directory_picks_markdown_only() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.md"), "# A\n\n## B\n\n- x\n- y\n").unwrap();
        std::fs::write(temp.path().join("b.md"), "").unwrap();
        std::fs::write(temp.path().join("notes.txt"), "# ignored").unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();
        std::fs::write(temp.path().join("sub/c.md"), "plain\ttext").unwrap();

        let audits = score_path(&SeverityScorer::default(), temp.path()).unwrap();
        assert_eq!(audits.len(), 3);

        let by_name = |name: &str| {
            audits
                .iter()
                .find(|a| a.label.ends_with(name))
                .unwrap()
                .finding
                .severity
        };
        assert_eq!(by_name("a.md"), Severity::Ok);
        assert_eq!(by_name("b.md"), Severity::Fail);
        assert_eq!(by_name("c.md"), Severity::Warn);
    }

    #[test]
    fn test_score_single_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("x.md");
        std::fs::write(&file, "# Title").unwrap();

        let audits = score_path(&SeverityScorer::default(), &file).unwrap();
        assert_eq!(audits.len(), 1);
        assert_eq!(audits[0].finding.severity, Severity::Warn);
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(score_path(&SeverityScorer::default(), &temp.path().join("nope")).is_err());
    }
}
