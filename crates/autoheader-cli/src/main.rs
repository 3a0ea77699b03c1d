//! autoheader CLI: file headers for newly created source files.
//!
//! Provides five commands: `watch`, `configure`, `apply`, `preview`, and
//! `templates`. `watch` is the long-running mode; the others are one-shot
//! helpers around the same settings and templates.
//!
//! All header logic lives in [`autoheader_core`]; this crate only parses
//! arguments, prompts, and prints.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "autoheader",
    about = "Insert author/date headers into newly created empty source files",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Workspace directory (local settings live in <DIR>/.autoheader/)
    #[arg(long, short = 'w', global = true, default_value = ".", env = "AUTOHEADER_WORKSPACE")]
    workspace: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the workspace and add headers to new empty files
    Watch {
        /// Debounce before the emptiness re-check, in milliseconds
        #[arg(long, default_value = "100")]
        delay_ms: u64,

        /// Never run the first-run setup prompt
        #[arg(long)]
        no_setup: bool,
    },

    /// Configure identity (author, organization, contact)
    Configure {
        /// Write to the workspace settings instead of the global ones
        #[arg(long)]
        local: bool,
    },

    /// Add headers to existing empty files now
    Apply {
        /// Files to process
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the header that a new file with this name would get
    Preview {
        /// File name, e.g. `solver.py`
        file_name: String,
    },

    /// List extensions that have a template
    Templates {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Watch { delay_ms, no_setup } => {
            commands::watch::run(&cli.workspace, delay_ms, no_setup).await?;
        }
        Commands::Configure { local } => {
            commands::configure::run(&cli.workspace, local)?;
        }
        Commands::Apply { files } => {
            commands::apply::run(&cli.workspace, &files).await?;
        }
        Commands::Preview { file_name } => {
            commands::preview::run(&cli.workspace, &file_name)?;
        }
        Commands::Templates { json } => {
            commands::templates::run(&cli.workspace, json)?;
        }
    }

    Ok(())
}
