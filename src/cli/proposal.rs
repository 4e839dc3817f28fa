//! Proposal CLI commands

use super::{separator, Project};
use crate::models::{Proposal, ProposalPatch, ProposalStatus};
use crate::Result;
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ProposalCommands {
    /// Create a proposal in DRAFT
    New {
        title: String,

        /// Markdown file with the proposal body
        #[arg(long)]
        file: PathBuf,
    },

    /// List proposals
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show a proposal with its apply preview
    Show {
        id: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Resolve the apply action embedded in the proposal body
    Preview { id: String },

    /// DRAFT -> SUBMITTED
    Submit { id: String },

    /// SUBMITTED -> APPROVED
    Approve { id: String },

    /// SUBMITTED -> REJECTED
    Reject {
        id: String,

        #[arg(long)]
        reason: Option<String>,
    },

    /// Edit title and/or body while DRAFT or SUBMITTED
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        /// Markdown file with the new body
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// APPROVED -> APPLIED, replacing the target document content (governed action)
    Apply {
        id: String,

        /// Run even when the system is GUARDED
        #[arg(long)]
        operator: bool,
    },
}

pub fn run(cmd: ProposalCommands) -> Result<()> {
    match cmd {
        ProposalCommands::New { title, file } => {
            let content = std::fs::read_to_string(&file)?;
            let mut project = Project::open(false)?;
            let proposal = project.service.create_proposal(&title, &content)?;
            println!("{}", format!("✓ Created proposal {}", proposal.id).green());
            print_preview(&project, &proposal.id)?;
        }
        ProposalCommands::List { json } => {
            let project = Project::open(false)?;
            let proposals = project.service.list_proposals()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&proposals)?);
                return Ok(());
            }
            if proposals.is_empty() {
                println!("{}", "No proposals".bright_black());
            }
            for proposal in &proposals {
                println!(
                    "{} {}  {}  {}",
                    proposal.status.emoji(),
                    status_colored(proposal.status),
                    proposal.id.bright_black(),
                    proposal.title
                );
            }
        }
        ProposalCommands::Show { id, json } => {
            let project = Project::open(false)?;
            let proposal = project.service.get_proposal(&id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&proposal)?);
                return Ok(());
            }
            print_proposal(&proposal);
            print_preview(&project, &id)?;
        }
        ProposalCommands::Preview { id } => {
            let project = Project::open(false)?;
            print_preview(&project, &id)?;
        }
        ProposalCommands::Submit { id } => {
            let mut project = Project::open(false)?;
            report_transition(&project.service.submit(&id)?);
        }
        ProposalCommands::Approve { id } => {
            let mut project = Project::open(false)?;
            report_transition(&project.service.approve(&id)?);
        }
        ProposalCommands::Reject { id, reason } => {
            let mut project = Project::open(false)?;
            report_transition(&project.service.reject(&id, reason)?);
        }
        ProposalCommands::Edit { id, title, file } => {
            let content = file.map(std::fs::read_to_string).transpose()?;
            let patch = ProposalPatch { title, content };
            if patch.is_empty() {
                anyhow::bail!("Nothing to edit: pass --title and/or --file");
            }
            let mut project = Project::open(false)?;
            let proposal = project.service.edit(&id, &patch)?;
            println!("{}", format!("✓ Edited proposal {}", proposal.id).green());
        }
        ProposalCommands::Apply { id, operator } => {
            let mut project = Project::open(operator)?;
            let (proposal, outcome) = project.service.apply(&id)?;
            report_transition(&proposal);
            println!(
                "   {}: {} -> {}",
                outcome.target_document_id,
                outcome.previous.severity,
                outcome.updated.severity
            );
            if let Some(caution) = &outcome.caution {
                println!("   {}", format!("⚠️  {}", caution).yellow());
            }
        }
    }

    Ok(())
}

fn status_colored(status: ProposalStatus) -> colored::ColoredString {
    match status {
        ProposalStatus::Draft => status.name().yellow(),
        ProposalStatus::Submitted => status.name().cyan(),
        ProposalStatus::Approved => status.name().blue(),
        ProposalStatus::Rejected => status.name().red(),
        ProposalStatus::Applied => status.name().green(),
    }
}

fn report_transition(proposal: &Proposal) {
    println!(
        "{} {} is now {}",
        proposal.status.emoji(),
        proposal.id,
        status_colored(proposal.status).bold()
    );
}

fn print_proposal(proposal: &Proposal) {
    println!("{}", proposal.title.cyan().bold());
    println!("{}", separator().bright_black());
    println!("   Status:  {} {}", proposal.status.emoji(), status_colored(proposal.status));
    println!("   Id:      {}", proposal.id);
    println!("   Updated: {}", proposal.updated_at.format("%Y-%m-%d %H:%M:%S"));
    if let Some(reason) = &proposal.rejection_reason {
        println!("   Reason:  {}", reason);
    }
    println!();
    println!("{}", proposal.content);
}

fn print_preview(project: &Project, id: &str) -> Result<()> {
    println!();
    println!("{}", "Apply preview:".yellow());
    match project.service.preview(id)? {
        Ok(action) => {
            println!("   Target: {}", action.target_document_id);
            match &action.new_content {
                Some(content) => println!("   New content: {} chars", content.chars().count()),
                None => println!("   {}", "New content: missing (apply will be refused)".yellow()),
            }
        }
        Err(e) => println!("   {}", e.to_string().red()),
    }
    Ok(())
}
