//! Core domain types.
//!
//! - `SizeTier` / `TierTable` - output resolutions with their folders and suffixes
//! - `Manifest` / `ImageEntry` - the character image manifest
//! - `Dimensions` - pixel sizes

mod manifest;
mod tier;

pub use manifest::{group_label, ImageEntry, Manifest, Role};
pub use tier::{Dimensions, SizeTier, TierTable};
