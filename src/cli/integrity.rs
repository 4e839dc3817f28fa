use super::Project;
use crate::gate::SystemMode;
use crate::validator::generate_report;
use crate::Result;
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IntegrityJsonOutput<'a> {
    mode: SystemMode,
    label: &'a str,
    #[serde(flatten)]
    result: &'a crate::validator::IntegrityResult,
    reasons: Vec<String>,
}

/// Print the canon integrity report
///
/// With `check`, a failing report also fails the command.
pub fn run(label: &str, json: bool, check: bool) -> Result<()> {
    let project = Project::open(false)?;
    let readiness = project.service.readiness()?;

    if json {
        let output = IntegrityJsonOutput {
            mode: readiness.mode,
            label,
            result: &readiness.integrity,
            reasons: readiness.reasons(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", generate_report(&readiness.integrity, label, &Utc::now()));
        println!();
        let mode = match readiness.mode {
            SystemMode::Governed => readiness.mode.name().green().bold(),
            SystemMode::Guarded => readiness.mode.name().red().bold(),
        };
        println!("System mode: {}", mode);
    }

    if check && !readiness.integrity.passed {
        anyhow::bail!("Canon integrity check failed");
    }
    Ok(())
}
