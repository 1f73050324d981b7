//! All-tiers coverage and orphan detection.
//!
//! Unlike role-mapped verification, every entry is expected at every tier
//! regardless of which tiers its roles use. Only existence is checked. The
//! second pass looks the other way round: files sitting in a tier folder
//! that no entry or reserved name accounts for.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::Path;

use serde::Serialize;
use walkdir::WalkDir;

use crate::output::{plural, Printer};
use crate::types::{Manifest, TierTable};

use super::finding::{Finding, Findings};

/// Outcome of the existence pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoverageReport {
    /// Image entries scanned.
    pub entries: usize,
    /// Files expected, one per entry per tier.
    pub expected: usize,
    /// Expected files found on disk.
    pub found: usize,
    /// Entries present at every tier.
    pub complete_entries: usize,
    pub findings: Findings,
}

impl CoverageReport {
    pub fn missing_count(&self) -> usize {
        self.findings.missing().count()
    }
}

/// Orphan status of one tier folder.
///
/// Names that are not valid UTF-8 are listed lossily.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderReport {
    pub tier: String,
    /// False when the folder does not exist and was skipped.
    pub scanned: bool,
    /// Unlisted file names, sorted.
    pub orphans: Vec<String>,
}

/// Outcome of the orphan pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrphanReport {
    pub folders: Vec<FolderReport>,
}

impl OrphanReport {
    pub fn orphan_count(&self) -> usize {
        self.folders.iter().map(|f| f.orphans.len()).sum()
    }

    /// One orphan finding per unlisted file in a single tier folder.
    pub fn findings_in(&self, tier: &str) -> Findings {
        let mut findings = Findings::new();
        for folder in self.folders.iter().filter(|f| f.tier == tier) {
            for file in &folder.orphans {
                findings.push(Finding::Orphan {
                    tier: folder.tier.clone(),
                    file: file.clone(),
                });
            }
        }
        findings
    }
}

/// Both passes of a full validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FullReport {
    pub coverage: CoverageReport,
    pub orphans: OrphanReport,
}

impl FullReport {
    /// True when every expected file exists. Orphans do not fail a run.
    pub fn passed(&self) -> bool {
        !self.coverage.findings.has_errors()
    }
}

/// Check that every entry exists at every tier.
pub fn check_coverage(
    manifest: &Manifest,
    assets: &Path,
    tiers: &TierTable,
    printer: &Printer,
) -> CoverageReport {
    let mut report = CoverageReport::default();

    for (character, images) in &manifest.witch_images {
        printer.status(
            "Checking",
            &format!("{} ({})", character, plural(images.len(), "image", "images")),
        );

        for entry in images {
            report.entries += 1;
            let mut complete = true;

            for tier in tiers.iter() {
                report.expected += 1;
                let path = tier.path(assets, &entry.filename);

                if path.exists() {
                    report.found += 1;
                } else {
                    complete = false;
                    printer.warning("Missing", &path.display().to_string());
                    report.findings.push(Finding::Missing {
                        character: character.clone(),
                        filename: entry.filename.clone(),
                        group: entry.group.clone(),
                        path,
                        tier: tier.folder.clone(),
                    });
                }
            }

            if complete {
                report.complete_entries += 1;
                printer.info(
                    "Ok",
                    &format!("{} (group {})", entry.filename, entry.group_label()),
                );
            }
        }
    }

    report
}

/// Every file name the manifest implies, plus the exempt names.
pub fn expected_files(manifest: &Manifest, tiers: &TierTable, exempt: &[String]) -> HashSet<String> {
    let mut expected: HashSet<String> = manifest
        .entries()
        .flat_map(|(_, entry)| tiers.iter().map(move |t| t.file_name(&entry.filename)))
        .collect();
    expected.extend(exempt.iter().cloned());
    expected
}

/// Names that are not valid UTF-8 can never match a manifest entry.
fn is_expected(expected: &HashSet<String>, name: &OsStr) -> bool {
    name.to_str().is_some_and(|n| expected.contains(n))
}

/// Report files in each tier folder that nothing accounts for.
///
/// The expected set spans all tiers, so a file named for another tier is
/// not reported. Folders that do not exist are skipped.
pub fn find_orphans(
    manifest: &Manifest,
    assets: &Path,
    tiers: &TierTable,
    exempt: &[String],
    printer: &Printer,
) -> OrphanReport {
    let expected = expected_files(manifest, tiers, exempt);
    let mut report = OrphanReport::default();

    for tier in tiers.iter() {
        let dir = tier.dir(assets);

        if !dir.is_dir() {
            printer.verbose("Skipping", &format!("{} (not found)", dir.display()));
            report.folders.push(FolderReport {
                tier: tier.folder.clone(),
                scanned: false,
                orphans: Vec::new(),
            });
            continue;
        }

        let mut orphans = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            // Entries that cannot be read are still listed by name.
            let (path, name) = match entry {
                Ok(e) => (e.path().to_path_buf(), e.file_name().to_os_string()),
                Err(e) => match e.path().and_then(|p| p.file_name().map(|n| (p, n))) {
                    Some((p, n)) => (p.to_path_buf(), n.to_os_string()),
                    None => {
                        printer.warning("Unreadable", &format!("{}: {}", dir.display(), e));
                        continue;
                    }
                },
            };

            // is_dir follows links, so a dangling link is reported like a file
            if path.is_dir() {
                continue;
            }
            if !is_expected(&expected, &name) {
                orphans.push(name.to_string_lossy().into_owned());
            }
        }

        report.folders.push(FolderReport {
            tier: tier.folder.clone(),
            scanned: true,
            orphans,
        });
    }

    report
}

/// Run the coverage pass then the orphan pass.
pub fn validate_all(
    manifest: &Manifest,
    assets: &Path,
    tiers: &TierTable,
    exempt: &[String],
    printer: &Printer,
) -> FullReport {
    FullReport {
        coverage: check_coverage(manifest, assets, tiers, printer),
        orphans: find_orphans(manifest, assets, tiers, exempt, printer),
    }
}
