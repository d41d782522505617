//! docflow-cli - Command-line interface for docflow
//!
//! Converts workflow XML into the runtime JSON document format and answers
//! structural and permission queries against workflow documents.

mod commands;
mod xml;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docflow-cli")]
#[command(about = "Command-line interface for the docflow workflow engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a workflow XML file to the runtime JSON document
    Convert {
        /// Input XML file
        input: PathBuf,

        /// Output JSON file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show type info, checksum, states, and transitions of a document
    Inspect {
        /// Workflow JSON document
        file: PathBuf,
    },

    /// Validate a document and report referential gaps
    Check {
        /// Workflow JSON document
        file: PathBuf,
    },

    /// List valid workflow documents in a directory
    Discover {
        /// Directory to scan
        dir: PathBuf,
    },

    /// Decide whether a role may execute a transition
    CanTransit {
        /// Workflow JSON document
        file: PathBuf,

        /// Role identifier
        #[arg(short, long)]
        role: String,

        /// Transition name
        #[arg(short, long)]
        transition: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match commands::execute(cli.command).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            std::process::exit(1);
        }
    }
}
