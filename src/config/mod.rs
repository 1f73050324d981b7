//! Project configuration (`witch-assets.yaml`) and path resolution.
//!
//! Every job works from three locations: the assets root holding the tier
//! folders, the directory of source images to resize, and the image
//! manifest. They default to the game's layout relative to the working
//! directory and can be moved with a config file or command-line flags.
//!
//! # Example
//!
//! ```ignore
//! use witch_assets::config::discover;
//!
//! let project = discover(".")?;
//! println!("Assets in {}", project.assets.display());
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WitchError};
use crate::types::TierTable;

/// The name of the config file.
pub const CONFIG_FILENAME: &str = "witch-assets.yaml";

/// Project config loaded from witch-assets.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory containing one folder per tier.
    pub assets: PathBuf,

    /// Directory of source images for resizing. Defaults to `assets`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    /// Path of the image manifest.
    pub manifest: PathBuf,

    /// Extension of source images, matched case-insensitively.
    pub source_extension: String,

    /// Output tiers, in processing order.
    pub tiers: TierTable,

    /// Base names that may exist in every tier folder without a manifest entry.
    pub reserved: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assets: PathBuf::from("assets"),
            source: None,
            manifest: PathBuf::from("json/witchesImages.json"),
            source_extension: "png".to_string(),
            tiers: TierTable::default(),
            reserved: vec!["_bombTile".to_string()],
        }
    }
}

impl Config {
    /// Load config from a witch-assets.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| WitchError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| WitchError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })?;
        config.tiers.check()?;

        if config.source_extension.trim_start_matches('.').is_empty() {
            return Err(WitchError::Config {
                message: "`source_extension` is empty".to_string(),
                help: Some("Use an extension such as `png`".to_string()),
            });
        }

        Ok(config)
    }

    /// Serialize to YAML for `init`.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| WitchError::Config {
            message: format!("Failed to serialize config: {}", e),
            help: None,
        })
    }

    /// The source extension without a leading dot.
    pub fn extension(&self) -> &str {
        self.source_extension.trim_start_matches('.')
    }

    /// Exempt file names, one per reserved base name per tier.
    pub fn exempt_files(&self) -> Vec<String> {
        self.tiers.reserved_files(&self.reserved)
    }
}

/// Path overrides from the command line. Relative paths resolve against
/// the working directory, not the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub assets: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
}

/// A config with its paths resolved.
#[derive(Debug, Clone)]
pub struct Project {
    /// Directory the config's relative paths resolve against.
    pub root: PathBuf,

    /// Whether a config file was found.
    pub has_config: bool,

    pub config: Config,

    pub assets: PathBuf,
    pub source: PathBuf,
    pub manifest: PathBuf,
}

impl Project {
    /// Resolve a config's paths against `root`.
    pub fn new(root: impl Into<PathBuf>, config: Config, has_config: bool) -> Self {
        let root = root.into();
        let assets = root.join(&config.assets);
        let source = match &config.source {
            Some(source) => root.join(source),
            None => assets.clone(),
        };
        let manifest = root.join(&config.manifest);

        Self {
            root,
            has_config,
            config,
            assets,
            source,
            manifest,
        }
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        let source_follows_assets = self.config.source.is_none();

        if let Some(assets) = overrides.assets {
            if source_follows_assets {
                self.source = assets.clone();
            }
            self.assets = assets;
        }
        if let Some(source) = overrides.source {
            self.source = source;
        }
        if let Some(manifest) = overrides.manifest {
            self.manifest = manifest;
        }
        self
    }

    pub fn tiers(&self) -> &TierTable {
        &self.config.tiers
    }
}

/// Discover the project rooted at a directory.
///
/// Uses `witch-assets.yaml` in `root` when present, otherwise the defaults.
pub fn discover(root: impl AsRef<Path>) -> Result<Project> {
    let root = root.as_ref().to_path_buf();
    let config_path = root.join(CONFIG_FILENAME);

    if config_path.exists() {
        let config = Config::load(&config_path)?;
        Ok(Project::new(root, config, true))
    } else {
        Ok(Project::new(root, Config::default(), false))
    }
}

/// Load the project from an explicit config file.
pub fn load_project(config_path: &Path) -> Result<Project> {
    let config = Config::load(config_path)?;
    let root = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok(Project::new(root, config, true))
}
