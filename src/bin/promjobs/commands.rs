use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use promjobs_config::Document;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub mod extra;
pub mod jobs;
pub mod list;
pub mod prompt;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Application {
    #[command(subcommand)]
    pub command: SubCommands,
}

#[derive(Subcommand)]
pub enum SubCommands {
    /// Print every job and, for each of its targets, the action prompt.
    Prompt(prompt::Arguments),

    /// List all (job, target) pairs as JSON.
    List(list::Arguments),

    /// Summarize every job as JSON, with the global defaults applied.
    Jobs(jobs::Arguments),

    /// Dump the top-level keys promjobs does not interpret as JSON.
    Extra(extra::Arguments),
}

/// Location of the configuration, shared by every subcommand.
#[derive(Args)]
pub struct Source {
    /// Path to the Prometheus configuration (YAML or JSON).
    #[arg(value_name = "FILE", env = "PROMJOBS_FILE")]
    pub file: PathBuf,
}

pub fn handle_command(app: Application) -> Result<()> {
    match app.command {
        SubCommands::Prompt(args) => prompt::handle_command(args),
        SubCommands::List(args) => list::handle_command(args),
        SubCommands::Jobs(args) => jobs::handle_command(args),
        SubCommands::Extra(args) => extra::handle_command(args),
    }
}

/// Read and decode the configuration at `path`.
pub fn load_document(path: &Path) -> Result<Document> {
    let input = std::fs::read(path)
        .with_context(|| format!("Unable to read configuration {}", path.display()))?;

    let document = promjobs_config::from_slice(&input)
        .with_context(|| format!("Badly formatted configuration {}", path.display()))?;

    info!(
        jobs = document.jobs.len(),
        "Loaded configuration from {}",
        path.display()
    );

    Ok(document)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    if pretty {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", serde_json::to_string(value)?);
    }

    Ok(())
}
