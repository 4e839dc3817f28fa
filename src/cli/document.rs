//! Document CLI commands

use super::Project;
use crate::services::CreateDocumentInput;
use crate::Result;
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum DocumentCommands {
    /// List documents in the store
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Create a canonical document (governed action)
    Create {
        /// Stable key, e.g. CANON.md
        key: String,

        /// File with the initial content (defaults to a heading with the key)
        #[arg(long)]
        file: Option<PathBuf>,

        #[arg(long)]
        title: Option<String>,

        /// Document id (defaults to a new UUID)
        #[arg(long)]
        id: Option<String>,

        /// Run even when the system is GUARDED
        #[arg(long)]
        operator: bool,
    },

    /// Mark a document governed, or ungoverned with --off (governed action)
    Governance {
        /// Document id
        id: String,

        #[arg(long)]
        off: bool,

        /// Run even when the system is GUARDED
        #[arg(long)]
        operator: bool,
    },

    /// Mark a document RAG-ready, or not with --off (governed action)
    Rag {
        /// Document id
        id: String,

        #[arg(long)]
        off: bool,

        /// Run even when the system is GUARDED
        #[arg(long)]
        operator: bool,
    },
}

pub fn run(cmd: DocumentCommands) -> Result<()> {
    match cmd {
        DocumentCommands::List { json } => {
            let project = Project::open(false)?;
            let documents = project.service.snapshot()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&documents)?);
                return Ok(());
            }
            if documents.is_empty() {
                println!("{}", "No documents in store".bright_black());
            }
            for doc in &documents {
                println!(
                    "{}  {}  governed={} ragReady={}",
                    doc.id.bright_black(),
                    doc.label().bold(),
                    doc.governed,
                    doc.rag_ready
                );
            }
        }
        DocumentCommands::Create {
            key,
            file,
            title,
            id,
            operator,
        } => {
            let content = match file {
                Some(path) => std::fs::read_to_string(&path)?,
                None => format!("# {}\n", key.trim_end_matches(".md")),
            };
            let mut project = Project::open(operator)?;
            let doc = project.service.create_canonical_document(CreateDocumentInput {
                id,
                key,
                title,
                content,
            })?;
            println!("{}", format!("✓ Created {} ({})", doc.label(), doc.id).green());
        }
        DocumentCommands::Governance { id, off, operator } => {
            let mut project = Project::open(operator)?;
            let doc = project.service.set_governed(&id, !off)?;
            println!(
                "{}",
                format!("✓ {} governed = {}", doc.label(), doc.governed).green()
            );
        }
        DocumentCommands::Rag { id, off, operator } => {
            let mut project = Project::open(operator)?;
            let doc = project.service.set_rag_ready(&id, !off)?;
            println!(
                "{}",
                format!("✓ {} ragReady = {}", doc.label(), doc.rag_ready).green()
            );
        }
    }

    Ok(())
}
