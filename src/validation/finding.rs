//! Finding types for validation results.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

use crate::types::{group_label, Dimensions, Role};

/// Severity level for a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single discrepancy between the manifest and the files on disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Finding {
    /// An expected file does not exist.
    Missing {
        character: String,
        filename: String,
        group: Value,
        path: PathBuf,
        tier: String,
    },
    /// A file exists at the wrong pixel size.
    WrongSize {
        character: String,
        path: PathBuf,
        tier: String,
        expected: Dimensions,
        actual: Dimensions,
    },
    /// A file exists but could not be read as an image.
    Unreadable {
        character: String,
        path: PathBuf,
        message: String,
    },
    /// An entry names a tier that is not configured.
    UnknownRole {
        character: String,
        filename: String,
        role: Role,
        token: String,
    },
    /// A file in a tier folder that no entry or reservation accounts for.
    Orphan { tier: String, file: String },
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Finding::Missing { .. } | Finding::WrongSize { .. } => Severity::Error,
            Finding::Unreadable { .. } | Finding::UnknownRole { .. } | Finding::Orphan { .. } => {
                Severity::Warning
            }
        }
    }

    /// Machine-readable code, e.g. "witch::validate::missing".
    pub fn code(&self) -> &'static str {
        match self {
            Finding::Missing { .. } => "witch::validate::missing",
            Finding::WrongSize { .. } => "witch::validate::wrong-size",
            Finding::Unreadable { .. } => "witch::validate::unreadable",
            Finding::UnknownRole { .. } => "witch::validate::unknown-role",
            Finding::Orphan { .. } => "witch::validate::orphan",
        }
    }

    /// Help text suggesting how to fix the issue.
    pub fn help(&self) -> Option<String> {
        match self {
            Finding::Missing { .. } => {
                Some("Run `witch-assets resize` on the source image".to_string())
            }
            Finding::WrongSize { .. } => {
                Some("Re-run `witch-assets resize` to regenerate the tier".to_string())
            }
            Finding::UnknownRole { .. } => None,
            Finding::Unreadable { .. } => None,
            Finding::Orphan { .. } => {
                Some("Add an entry to the manifest or delete the file".to_string())
            }
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Finding::Missing { .. })
    }

    pub fn is_wrong_size(&self) -> bool {
        matches!(self, Finding::WrongSize { .. })
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::Missing {
                character,
                filename,
                group,
                path,
                tier,
            } => write!(
                f,
                "{} (group {}) is missing {} at {} [{}]",
                character,
                group_label(group),
                filename,
                path.display(),
                tier
            ),
            Finding::WrongSize {
                character,
                path,
                expected,
                actual,
                ..
            } => write!(
                f,
                "{}: {} is {}, expected {}",
                character,
                path.display(),
                actual,
                expected
            ),
            Finding::Unreadable {
                character,
                path,
                message,
            } => write!(f, "{}: cannot read {}: {}", character, path.display(), message),
            Finding::UnknownRole {
                character,
                filename,
                role,
                token,
            } => write!(
                f,
                "{}: unknown folder '{}' for {} ({})",
                character,
                token,
                filename,
                role.field()
            ),
            Finding::Orphan { tier, file } => write!(f, "{}/{} is not listed", tier, file),
        }
    }
}

/// Collects findings from a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Findings {
    findings: Vec<Finding>,
}

impl Findings {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finding.
    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.severity() == Severity::Error)
    }

    /// Count warnings.
    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity() == Severity::Warning)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Iterate over findings.
    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter()
    }

    pub fn missing(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_missing())
    }

    pub fn wrong_size(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_wrong_size())
    }
}
