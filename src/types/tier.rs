//! Size tier types.
//!
//! A tier is one of the fixed square resolutions tiles are shipped at. Each
//! tier owns a folder under the assets root and a filename suffix, so the
//! asset for base name `TW01` at the 99px tier lives at
//! `<assets>/99sized/TW01_99.png`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WitchError};

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Square dimensions with both sides equal to `size`.
    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A single output resolution with its folder and filename suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeTier {
    /// Folder name under the assets root, also the token manifests use.
    pub folder: String,
    /// Side length in pixels.
    pub size: u32,
    /// Filename suffix appended to an entry's base name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl SizeTier {
    /// Create a tier with the conventional `_<size>.png` suffix.
    pub fn new(folder: impl Into<String>, size: u32) -> Self {
        Self {
            folder: folder.into(),
            size,
            suffix: None,
        }
    }

    /// The effective suffix.
    pub fn suffix(&self) -> String {
        match &self.suffix {
            Some(suffix) => suffix.clone(),
            None => format!("_{}.png", self.size),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::square(self.size)
    }

    /// File name for a base name at this tier, e.g. `TW01_99.png`.
    pub fn file_name(&self, base_name: &str) -> String {
        format!("{}{}", base_name, self.suffix())
    }

    /// Directory holding this tier's files.
    pub fn dir(&self, assets_root: &Path) -> PathBuf {
        assets_root.join(&self.folder)
    }

    /// Full path of a base name's file at this tier.
    pub fn path(&self, assets_root: &Path, base_name: &str) -> PathBuf {
        self.dir(assets_root).join(self.file_name(base_name))
    }
}

/// Ordered set of tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable {
    tiers: Vec<SizeTier>,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            tiers: vec![
                SizeTier::new("99sized", 99),
                SizeTier::new("124sized", 124),
                SizeTier::new("166sized", 166),
            ],
        }
    }
}

impl TierTable {
    /// Build a table, rejecting empty tables, zero sizes and duplicates.
    pub fn new(tiers: Vec<SizeTier>) -> Result<Self> {
        let table = Self { tiers };
        table.check()?;
        Ok(table)
    }

    /// Check the table invariants.
    pub fn check(&self) -> Result<()> {
        if self.tiers.is_empty() {
            return Err(WitchError::Config {
                message: "No size tiers configured".to_string(),
                help: Some("Add at least one entry under `tiers`".to_string()),
            });
        }

        for (i, tier) in self.tiers.iter().enumerate() {
            if tier.size == 0 {
                return Err(WitchError::Config {
                    message: format!("Tier '{}' has size 0", tier.folder),
                    help: Some("Tier sizes must be at least 1 pixel".to_string()),
                });
            }
            if tier.folder.is_empty() {
                return Err(WitchError::Config {
                    message: format!("Tier #{} has an empty folder name", i + 1),
                    help: None,
                });
            }

            let earlier = &self.tiers[..i];
            if earlier.iter().any(|t| t.folder == tier.folder) {
                return Err(WitchError::Config {
                    message: format!("Duplicate tier folder '{}'", tier.folder),
                    help: Some("Each tier needs its own folder".to_string()),
                });
            }
            if earlier.iter().any(|t| t.suffix() == tier.suffix()) {
                return Err(WitchError::Config {
                    message: format!("Duplicate tier suffix '{}'", tier.suffix()),
                    help: Some("Each tier needs its own filename suffix".to_string()),
                });
            }
        }

        Ok(())
    }

    /// Find the tier a manifest token (folder name) refers to.
    pub fn lookup(&self, folder: &str) -> Option<&SizeTier> {
        self.tiers.iter().find(|t| t.folder == folder)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SizeTier> {
        self.tiers.iter()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Exempt file names for reserved base names, one per tier each.
    pub fn reserved_files(&self, reserved: &[String]) -> Vec<String> {
        reserved
            .iter()
            .flat_map(|base| self.tiers.iter().map(move |t| t.file_name(base)))
            .collect()
    }
}
