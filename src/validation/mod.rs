//! Validation of the image manifest against the tier folders.
//!
//! Two modes run over the same manifest:
//!
//! - role-mapped ([`verify_roles`]): each entry's easy/medium/hard tier file
//!   must exist at the tier's exact dimensions. Used by `witch-assets verify`.
//! - all-tiers ([`validate_all`]): each entry must exist at every tier, and
//!   tier folders must hold nothing unlisted. Used by `witch-assets validate`.

mod coverage;
mod finding;
mod verify;

pub use coverage::{
    check_coverage, expected_files, find_orphans, validate_all, CoverageReport, FolderReport,
    FullReport, OrphanReport,
};
pub use finding::{Finding, Findings, Severity};
pub use verify::{verify_roles, VerifyReport};

use crate::output::Printer;

/// Named validation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Check the tier each role points at, with dimensions.
    RoleMapped,
    /// Check every tier for every entry, existence only, plus orphans.
    AllTiers,
}

impl ValidationMode {
    pub fn title(&self) -> &'static str {
        match self {
            ValidationMode::RoleMapped => "Verification",
            ValidationMode::AllTiers => "Validation",
        }
    }

    /// Status verb for a passing run.
    pub fn verb(&self) -> &'static str {
        match self {
            ValidationMode::RoleMapped => "Verified",
            ValidationMode::AllTiers => "Validated",
        }
    }
}

/// Print a detailed listing of findings to stderr under a heading.
pub fn print_findings<'a>(
    printer: &Printer,
    heading: &str,
    findings: impl Iterator<Item = &'a Finding>,
) {
    let findings: Vec<&Finding> = findings.collect();
    if findings.is_empty() {
        return;
    }

    eprintln!();
    eprintln!("{}", printer.bold(heading));
    for f in findings {
        let label = printer.severity(&f.severity().to_string(), f.severity() == Severity::Error);
        eprintln!("  {}[{}]: {}", label, f.code(), f);
        if let Some(help) = f.help() {
            eprintln!("    {}", printer.dim(&format!("help: {}", help)));
        }
    }
}
