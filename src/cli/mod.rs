pub mod completions;
pub mod init;
pub mod resize;
pub mod validate;
pub mod verify;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::config::{discover, load_project, Overrides, Project};
use crate::error::{Result, WitchError};
use crate::output::{display_path, Printer, Verbosity};

/// witch-assets - Tile image tools for Who's That Witch
#[derive(Parser, Debug)]
#[command(name = "witch-assets")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only print verdicts and errors
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print resolved paths and per-step detail
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn printer(&self) -> Printer {
        let verbosity = if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        Printer::with_verbosity(verbosity)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resize source images into every tier folder
    Resize(resize::ResizeArgs),

    /// Check each entry's easy/medium/hard tiles exist at the right size
    Verify(verify::VerifyArgs),

    /// Check every entry exists at every tier and report unlisted files
    Validate(validate::ValidateArgs),

    /// Write a default witch-assets.yaml
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Where to find the project. Shared by the batch commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Config file (default: ./witch-assets.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Assets root holding the tier folders
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Image manifest JSON
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

impl ProjectArgs {
    /// Resolve the project from the config file and flag overrides.
    pub fn resolve(&self, source: Option<PathBuf>, printer: &Printer) -> Result<Project> {
        let project = match &self.config {
            Some(path) => load_project(path)?,
            None => discover(".")?,
        };

        if project.has_config {
            printer.verbose("Config", &display_path(&project.root));
        }

        let project = project.with_overrides(Overrides {
            assets: self.assets.clone(),
            source,
            manifest: self.manifest.clone(),
        });

        printer.verbose("Assets", &display_path(&project.assets));
        printer.verbose("Manifest", &display_path(&project.manifest));
        Ok(project)
    }
}

/// Report format for the validation commands.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// Human-readable status lines on stderr
    #[default]
    Text,
    /// Full report as JSON on stdout
    Json,
}

/// Write a report as pretty JSON to stdout.
pub fn print_json<T: Serialize>(report: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(|e| WitchError::Validation {
        message: format!("Failed to serialize report: {}", e),
        help: None,
    })?;
    println!("{}", json);
    Ok(())
}
