use super::score::print_summary;
use super::{separator, Project};
use crate::models::Severity;
use crate::validator::AuditSummary;
use crate::Result;
use colored::Colorize;

/// Score every document in the store
pub fn run(json: bool) -> Result<()> {
    let project = Project::open(false)?;
    let audits = project.service.audit()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&audits)?);
        return Ok(());
    }

    println!("{}", "🔎 Content audit".cyan().bold());
    println!("{}", separator().bright_black());

    if audits.is_empty() {
        println!("{}", "No documents in store".bright_black());
        return Ok(());
    }

    for audit in &audits {
        let label = match audit.finding.severity {
            Severity::Ok => audit.label.green(),
            Severity::Warn => audit.label.yellow(),
            Severity::Fail => audit.label.red(),
        };
        println!("{} {}", label.bold(), format!("({})", audit.document_id).bright_black());
        println!("   {}", audit.finding.format());
        println!(
            "   governed: {}  rag-ready: {}",
            flag(audit.finding.governed),
            flag(audit.finding.rag_ready)
        );
    }

    print_summary(&AuditSummary::from_audits(&audits));
    Ok(())
}

fn flag(value: bool) -> colored::ColoredString {
    if value {
        "yes".green()
    } else {
        "no".red()
    }
}
