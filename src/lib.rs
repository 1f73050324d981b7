//! witch-assets - Tile image tools for Who's That Witch
//!
//! Resizes source images into fixed square tiers and checks the image
//! manifest against the tier folders, either role by role with dimension
//! checks or tier by tier with orphan detection.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod render;
pub mod types;
pub mod validation;

pub use config::{discover, load_project, Config, Overrides, Project, CONFIG_FILENAME};
pub use error::{Result, WitchError};
pub use render::{resize_all, resize_file, ResizeFailure, ResizeReport};
pub use types::{Dimensions, ImageEntry, Manifest, Role, SizeTier, TierTable};
pub use validation::{
    check_coverage, find_orphans, validate_all, verify_roles, Finding, Findings, FullReport,
    OrphanReport, Severity, ValidationMode, VerifyReport,
};
