//! Init command implementation.
//!
//! Writes a `witch-assets.yaml` with the default tier table so the layout
//! can be edited instead of baked into each run.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{Config, CONFIG_FILENAME};
use crate::error::{Result, WitchError};
use crate::output::{display_path, Printer};

/// Write a default witch-assets.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Assets root to record, relative to the project directory
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Manifest path to record, relative to the project directory
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Overwrite existing witch-assets.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(WitchError::Config {
            message: format!("{} already exists", CONFIG_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let mut config = Config::default();
    if let Some(assets) = args.assets {
        config.assets = assets;
    }
    if let Some(manifest) = args.manifest {
        config.manifest = manifest;
    }

    // Report which parts of the layout already exist
    let assets_dir = args.path.join(&config.assets);
    for tier in config.tiers.iter() {
        let dir = tier.dir(&assets_dir);
        if dir.is_dir() {
            printer.info("Found", &display_path(&dir));
        } else {
            printer.warning("Missing", &format!("{} (create before resizing)", display_path(&dir)));
        }
    }
    if !args.path.join(&config.manifest).is_file() {
        printer.warning("Missing", &display_path(&args.path.join(&config.manifest)));
    }

    let yaml = config.to_yaml()?;
    fs::write(&config_path, yaml).map_err(|e| WitchError::Io {
        path: config_path.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    printer.success("Created", &display_path(&config_path));

    Ok(())
}
