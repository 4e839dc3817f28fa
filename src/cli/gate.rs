use super::Project;
use crate::gate::{check_allowed, GovernedAction};
use crate::Result;
use colored::Colorize;

/// Ask the gate whether a governed action may run right now
pub fn run(action: &str, json: bool) -> Result<()> {
    let action: GovernedAction = action.parse()?;
    let project = Project::open(false)?;
    let readiness = project.service.readiness()?;
    let refusal = check_allowed(readiness.mode, action, &readiness.reasons());

    if json {
        let output = serde_json::json!({
            "action": action,
            "mode": readiness.mode,
            "allowed": refusal.is_none(),
            "refusal": &refusal,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match &refusal {
            None => println!(
                "{} {} is allowed (system is {})",
                "✅".green(),
                action.to_string().bold(),
                readiness.mode
            ),
            Some(refusal) => {
                println!("{} {}", "⛔".red(), refusal.code.name().red().bold());
                println!("{}", refusal.message);
            }
        }
    }

    match refusal {
        None => Ok(()),
        Some(refusal) => Err(anyhow::anyhow!("{} refused ({})", refusal.action, refusal.code.name())),
    }
}
