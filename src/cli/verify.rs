//! Verify command implementation.
//!
//! Role-mapped check: each entry's easy, medium and hard tiles exist and
//! have their tier's exact dimensions.

use clap::Args;

use crate::error::{Result, WitchError};
use crate::output::{display_path, Printer};
use crate::types::Manifest;
use crate::validation::{print_findings, verify_roles, Finding, ValidationMode, VerifyReport};

use super::{print_json, Format, ProjectArgs};

/// Check each entry's easy/medium/hard tiles exist at the right size
#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

pub fn run(args: VerifyArgs, printer: &Printer) -> Result<()> {
    let project = args.project.resolve(None, printer)?;
    let manifest = Manifest::load(&project.manifest)?;

    printer.status("Verifying", &display_path(&project.manifest));
    let report = verify_roles(&manifest, &project.assets, project.tiers(), printer);

    match args.format {
        Format::Text => print_summary(&report, printer),
        Format::Json => print_json(&report)?,
    }

    verdict(&report, printer)
}

fn print_summary(report: &VerifyReport, printer: &Printer) {
    printer.info("Entries", &report.entries.to_string());
    printer.info("Checked", &report.files_checked.to_string());
    printer.info("Correct", &report.correct.to_string());
    printer.info("Missing", &report.missing_count().to_string());
    printer.info("Wrong size", &report.wrong_size_count().to_string());
    printer.info("Skipped", &report.findings.warning_count().to_string());

    print_findings(printer, "Missing files:", report.findings.missing());
    print_findings(printer, "Wrong size files:", report.findings.wrong_size());
    print_findings(
        printer,
        "Skipped:",
        report
            .findings
            .iter()
            .filter(|f| matches!(f, Finding::Unreadable { .. } | Finding::UnknownRole { .. })),
    );
}

fn verdict(report: &VerifyReport, printer: &Printer) -> Result<()> {
    let mode = ValidationMode::RoleMapped;

    if report.passed() {
        printer.success(mode.verb(), "all images verified successfully");
        Ok(())
    } else {
        Err(WitchError::Validation {
            message: format!(
                "{} found {} missing and {} wrong size file(s)",
                mode.title(),
                report.missing_count(),
                report.wrong_size_count()
            ),
            help: Some("Run `witch-assets resize` to regenerate tiles".to_string()),
        })
    }
}
