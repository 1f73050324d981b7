//! Tier resizing for source images.
//!
//! Each source image is stretched to every tier's square size (aspect ratio
//! is not preserved) with Lanczos3 resampling and written as PNG into the
//! tier folder as `<stem><suffix>`.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use serde::Serialize;

use crate::error::{Result, WitchError};
use crate::output::{display_path, plural, Printer};
use crate::types::{SizeTier, TierTable};

use super::scanner::scan_sources;

/// A source image that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResizeFailure {
    pub source: PathBuf,
    pub message: String,
}

/// Outcome of a resize batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResizeReport {
    /// Source images found.
    pub attempted: usize,
    /// Source images written at every tier.
    pub converted: usize,
    /// Files written, in processing order. Includes tiles written for a
    /// source that later failed at another tier.
    pub outputs: Vec<PathBuf>,
    pub failures: Vec<ResizeFailure>,
}

impl ResizeReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Stretch an image to a tier's square size.
pub fn resize_to_tier(img: &DynamicImage, tier: &SizeTier) -> DynamicImage {
    img.resize_exact(tier.size, tier.size, FilterType::Lanczos3)
}

/// Base name a source image's outputs are keyed on.
pub fn base_name(source: &Path) -> String {
    source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Resize one source image into every tier folder under `assets`.
///
/// Tier folders are not created. The first failing tier stops the file and
/// the error names that tier.
pub fn resize_file(source: &Path, assets: &Path, tiers: &TierTable) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(tiers.len());
    resize_into(source, assets, tiers, &mut written)?;
    Ok(written)
}

/// Like [`resize_file`], but tiles written before a failure stay in `written`.
fn resize_into(
    source: &Path,
    assets: &Path,
    tiers: &TierTable,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let img = image::open(source).map_err(|e| WitchError::Io {
        path: source.to_path_buf(),
        message: format!("Failed to load image: {}", e),
    })?;

    let base = base_name(source);

    for tier in tiers.iter() {
        let output = tier.path(assets, &base);
        resize_to_tier(&img, tier)
            .save_with_format(&output, ImageFormat::Png)
            .map_err(|e| WitchError::Io {
                path: output.clone(),
                message: format!("Failed to write {} tile: {}", tier.folder, e),
            })?;
        written.push(output);
    }

    Ok(())
}

/// Resize every source image in `source_dir`.
///
/// A missing source directory is fatal. A bad individual file is recorded
/// in the report and the batch continues.
pub fn resize_all(
    source_dir: &Path,
    extension: &str,
    assets: &Path,
    tiers: &TierTable,
    printer: &Printer,
) -> Result<ResizeReport> {
    let sources = scan_sources(source_dir, extension)?;
    let total = sources.len();

    printer.info(
        "Found",
        &format!(
            "{} in {}",
            plural(total, "source image", "source images"),
            display_path(source_dir)
        ),
    );

    let mut report = ResizeReport {
        attempted: total,
        ..Default::default()
    };

    for (index, source) in sources.iter().enumerate() {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let progress = format!("[{}/{}]", index + 1, total);

        let mut written = Vec::with_capacity(tiers.len());
        let result = resize_into(source, assets, tiers, &mut written);

        for output in &written {
            printer.verbose("Writing", &display_path(output));
        }
        report.outputs.extend(written);

        match result {
            Ok(()) => {
                printer.status("Resized", &format!("{} {}", printer.dim(&progress), name));
                report.converted += 1;
            }
            Err(e) => {
                printer.warning("Failed", &format!("{} {}: {}", progress, name, e));
                report.failures.push(ResizeFailure {
                    source: source.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}
