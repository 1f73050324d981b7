//! Validate command implementation.
//!
//! All-tiers check: every entry exists at every tier, and tier folders
//! hold nothing the manifest does not list.

use clap::Args;

use crate::error::{Result, WitchError};
use crate::output::{display_path, plural, Printer};
use crate::types::Manifest;
use crate::validation::{print_findings, validate_all, FullReport, ValidationMode};

use super::{print_json, Format, ProjectArgs};

/// Check every entry exists at every tier and report unlisted files
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let project = args.project.resolve(None, printer)?;
    let manifest = Manifest::load(&project.manifest)?;
    let exempt = project.config.exempt_files();

    printer.status("Validating", &display_path(&project.manifest));
    let report = validate_all(
        &manifest,
        &project.assets,
        project.tiers(),
        &exempt,
        printer,
    );

    match args.format {
        Format::Text => print_summary(&report, printer),
        Format::Json => print_json(&report)?,
    }

    let mode = ValidationMode::AllTiers;
    let missing = report.coverage.missing_count();
    if report.passed() {
        printer.success(
            mode.verb(),
            &format!(
                "{} present, {}",
                plural(report.coverage.found, "file", "files"),
                plural(report.orphans.orphan_count(), "unlisted file", "unlisted files")
            ),
        );
        Ok(())
    } else {
        Err(WitchError::Validation {
            message: format!(
                "{} found {} of {} expected file(s) missing",
                mode.title(),
                missing,
                report.coverage.expected
            ),
            help: Some("Run `witch-assets resize` on the missing sources".to_string()),
        })
    }
}

fn print_summary(report: &FullReport, printer: &Printer) {
    let coverage = &report.coverage;
    printer.info("Entries", &coverage.entries.to_string());
    printer.info("Expected", &coverage.expected.to_string());
    printer.info("Found", &coverage.found.to_string());
    printer.info("Missing", &coverage.missing_count().to_string());

    print_findings(printer, "Missing files:", coverage.findings.missing());

    for folder in &report.orphans.folders {
        if !folder.scanned {
            continue;
        }
        if folder.orphans.is_empty() {
            printer.info(&folder.tier, "all files accounted for");
        } else {
            // Heading and listing print together at every verbosity
            print_findings(
                printer,
                &orphan_heading(&folder.tier, folder.orphans.len()),
                report.orphans.findings_in(&folder.tier).iter(),
            );
        }
    }
}

fn orphan_heading(tier: &str, count: usize) -> String {
    format!(
        "{} in {}:",
        plural(count, "Unlisted file", "Unlisted files"),
        tier
    )
}
