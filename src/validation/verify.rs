//! Role-mapped verification.
//!
//! Each entry assigns a tier to the easy, medium and hard roles. For every
//! role the referenced tier file must exist and have the tier's exact pixel
//! dimensions.

use std::path::Path;

use serde::Serialize;

use crate::output::Printer;
use crate::types::{Dimensions, Manifest, Role, TierTable};

use super::finding::{Finding, Findings};

/// Outcome of a role-mapped verification pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VerifyReport {
    /// Image entries scanned.
    pub entries: usize,
    /// Role references resolved to a known tier.
    pub files_checked: usize,
    /// Files present with the expected dimensions.
    pub correct: usize,
    pub findings: Findings,
}

impl VerifyReport {
    pub fn missing_count(&self) -> usize {
        self.findings.missing().count()
    }

    pub fn wrong_size_count(&self) -> usize {
        self.findings.wrong_size().count()
    }

    /// True when nothing is missing and nothing has the wrong size.
    pub fn passed(&self) -> bool {
        !self.findings.has_errors()
    }
}

/// Verify every role reference in the manifest against the assets root.
///
/// Unknown tier tokens are recorded as warnings and skipped. A file that
/// exists but cannot be decoded is recorded and the scan continues.
pub fn verify_roles(
    manifest: &Manifest,
    assets: &Path,
    tiers: &TierTable,
    printer: &Printer,
) -> VerifyReport {
    let mut report = VerifyReport::default();

    for (character, images) in &manifest.witch_images {
        printer.status("Checking", character);

        for entry in images {
            report.entries += 1;

            for role in Role::ALL {
                let token = entry.role_token(role);
                let Some(tier) = tiers.lookup(token) else {
                    printer.warning(
                        "Warning",
                        &format!("Unknown folder '{}' for {}", token, entry.filename),
                    );
                    report.findings.push(Finding::UnknownRole {
                        character: character.clone(),
                        filename: entry.filename.clone(),
                        role,
                        token: token.to_string(),
                    });
                    continue;
                };

                let path = tier.path(assets, &entry.filename);
                report.files_checked += 1;

                if !path.exists() {
                    printer.warning("Missing", &path.display().to_string());
                    report.findings.push(Finding::Missing {
                        character: character.clone(),
                        filename: entry.filename.clone(),
                        group: entry.group.clone(),
                        path,
                        tier: tier.folder.clone(),
                    });
                    continue;
                }

                match image::image_dimensions(&path) {
                    Ok((width, height)) => {
                        let actual = Dimensions::new(width, height);
                        let expected = tier.dimensions();

                        if actual == expected {
                            report.correct += 1;
                            printer.info(
                                "Ok",
                                &format!(
                                    "{}/{} = {}",
                                    tier.folder,
                                    tier.file_name(&entry.filename),
                                    actual
                                ),
                            );
                        } else {
                            printer.warning(
                                "Wrong size",
                                &format!(
                                    "{} (expected {}, got {})",
                                    path.display(),
                                    expected,
                                    actual
                                ),
                            );
                            report.findings.push(Finding::WrongSize {
                                character: character.clone(),
                                path,
                                tier: tier.folder.clone(),
                                expected,
                                actual,
                            });
                        }
                    }
                    Err(e) => {
                        printer.warning(
                            "Unreadable",
                            &format!("{}: {}", path.display(), e),
                        );
                        report.findings.push(Finding::Unreadable {
                            character: character.clone(),
                            path,
                            message: e.to_string(),
                        });
                    }
                }
            }
        }
    }

    report
}
