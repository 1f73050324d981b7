//! Image manifest (`witchesImages.json`) types.
//!
//! The manifest maps each character name to the images drawn for it. Every
//! entry names a base filename and, per difficulty role, the tier folder the
//! game loads that image from.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, WitchError};

/// Difficulty role an entry assigns a tier to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Easy,
    Medium,
    Hard,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Easy, Role::Medium, Role::Hard];

    /// Name of the manifest field carrying this role's tier token.
    pub fn field(&self) -> &'static str {
        match self {
            Role::Easy => "easy_path",
            Role::Medium => "medium_path",
            Role::Hard => "hard_path",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Easy => write!(f, "easy"),
            Role::Medium => write!(f, "medium"),
            Role::Hard => write!(f, "hard"),
        }
    }
}

/// One image drawn for a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Base name, without tier suffix or extension.
    pub filename: String,
    /// Grouping tag used by the game; any JSON scalar.
    pub group: Value,
    pub easy_path: String,
    pub medium_path: String,
    pub hard_path: String,
}

impl ImageEntry {
    /// The tier token this entry assigns to a role.
    pub fn role_token(&self, role: Role) -> &str {
        match role {
            Role::Easy => &self.easy_path,
            Role::Medium => &self.medium_path,
            Role::Hard => &self.hard_path,
        }
    }

    /// The group rendered for humans: strings unquoted, everything else as JSON.
    pub fn group_label(&self) -> String {
        group_label(&self.group)
    }
}

/// Render a group value for display.
pub fn group_label(group: &Value) -> String {
    match group {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The parsed manifest, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "witchImages")]
    pub witch_images: IndexMap<String, Vec<ImageEntry>>,
}

impl Manifest {
    /// Load the manifest from disk.
    ///
    /// A missing file and malformed JSON are both fatal, reported with
    /// different messages.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            let message = if e.kind() == std::io::ErrorKind::NotFound {
                "Could not find manifest".to_string()
            } else {
                format!("Failed to read manifest: {}", e)
            };
            WitchError::Manifest {
                path: path.to_path_buf(),
                message,
                help: Some("Pass --manifest or set `manifest` in witch-assets.yaml".to_string()),
            }
        })?;

        Self::parse(&content).map_err(|e| match e {
            WitchError::Manifest { message, help, .. } => WitchError::Manifest {
                path: path.to_path_buf(),
                message,
                help,
            },
            other => other,
        })
    }

    /// Parse manifest JSON.
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| WitchError::Manifest {
            path: Default::default(),
            message: format!("Invalid JSON format: {}", e),
            help: Some(
                "Expected a top-level `witchImages` object mapping names to image entries"
                    .to_string(),
            ),
        })
    }

    /// Iterate `(character, entry)` pairs in manifest order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ImageEntry)> {
        self.witch_images
            .iter()
            .flat_map(|(name, images)| images.iter().map(move |e| (name.as_str(), e)))
    }

    /// Total number of image entries across all characters.
    pub fn entry_count(&self) -> usize {
        self.witch_images.values().map(Vec::len).sum()
    }

    pub fn character_count(&self) -> usize {
        self.witch_images.len()
    }
}
