//! Resizing of source images into the tier folders.

mod resize;
mod scanner;

pub use resize::{base_name, resize_all, resize_file, resize_to_tier, ResizeFailure, ResizeReport};
pub use scanner::{has_extension, scan_sources};
