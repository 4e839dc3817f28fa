use canon_gate::cli::{document::DocumentCommands, proposal::ProposalCommands};
use canon_gate::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "canon-gate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Governance and content-integrity engine for canonical documents", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize canon-gate in current directory
    Init {
        /// Rewrite canon/config.toml, keeping its values
        #[arg(short, long)]
        force: bool,
    },

    /// Score a markdown file or every .md file under a directory
    Score {
        path: PathBuf,

        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Score every document in the store
    Audit {
        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Print the canon integrity report
    Integrity {
        /// Label printed in the report header
        #[arg(short, long, default_value = "canon-gate")]
        label: String,

        /// Output in JSON format
        #[arg(short, long)]
        json: bool,

        /// Exit with an error when the check fails
        #[arg(long)]
        check: bool,
    },

    /// Ask whether a governed action is currently allowed
    Gate {
        /// CREATE_CANONICAL_DOCUMENT, UPDATE_GOVERNANCE, UPDATE_RAG_READINESS,
        /// APPLY_PROPOSAL or SCHEMA_CHANGE
        action: String,

        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Document operations
    #[command(subcommand)]
    Document(DocumentCommands),

    /// Proposal operations
    #[command(subcommand)]
    Proposal(ProposalCommands),

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { force } => {
            println!("{}", "🚀 Initializing canon-gate...".cyan());
            canon_gate::cli::init::run(force)?;
        }

        Commands::Score { path, json } => {
            canon_gate::cli::score::run(&path, json)?;
        }

        Commands::Audit { json } => {
            canon_gate::cli::audit::run(json)?;
        }

        Commands::Integrity { label, json, check } => {
            canon_gate::cli::integrity::run(&label, json, check)?;
        }

        Commands::Gate { action, json } => {
            canon_gate::cli::gate::run(&action, json)?;
        }

        Commands::Document(cmd) => {
            canon_gate::cli::document::run(cmd)?;
        }

        Commands::Proposal(cmd) => {
            canon_gate::cli::proposal::run(cmd)?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "canon-gate", &mut io::stdout());
        }
    }

    Ok(())
}
