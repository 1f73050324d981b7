//! Resize command implementation.
//!
//! Turns every source image into one tile per tier.

use std::path::PathBuf;

use clap::Args;

use crate::error::{Result, WitchError};
use crate::output::{display_path, plural, Printer};
use crate::render::resize_all;

use super::ProjectArgs;

/// Resize source images into every tier folder
#[derive(Args, Debug)]
pub struct ResizeArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Directory of source images (default: the assets root)
    #[arg(long)]
    pub source: Option<PathBuf>,
}

pub fn run(args: ResizeArgs, printer: &Printer) -> Result<()> {
    let project = args.project.resolve(args.source.clone(), printer)?;
    let tiers = project.tiers();

    printer.status("Resizing", &display_path(&project.source));

    let report = resize_all(
        &project.source,
        project.config.extension(),
        &project.assets,
        tiers,
        printer,
    )?;

    for tier in tiers.iter() {
        printer.info(
            "Output",
            &format!(
                "{} in {}",
                plural(report.converted, "image", "images"),
                tier.folder
            ),
        );
    }

    if report.is_complete() {
        printer.success(
            "Finished",
            &format!(
                "{}/{} images resized",
                report.converted, report.attempted
            ),
        );
        Ok(())
    } else {
        for failure in &report.failures {
            printer.error("Failed", &format!("{}: {}", display_path(&failure.source), failure.message));
        }
        Err(WitchError::Validation {
            message: format!(
                "{}/{} images resized, {} failed",
                report.converted,
                report.attempted,
                report.failures.len()
            ),
            help: Some("Each failure is listed above; tier folders are not created".to_string()),
        })
    }
}
