//! Source image discovery for the resizer.
//!
//! Only files directly inside the source directory are considered, so the
//! tier folders nested under an assets root are never picked up as sources.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, WitchError};

/// List source images in `dir` with the given extension, sorted by file name.
pub fn scan_sources(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(WitchError::Io {
            path: dir.to_path_buf(),
            message: "Source directory not found".to_string(),
        });
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        // Unreadable entries are kept so the resizer records them as failures
        let path = match entry {
            Ok(e) => e.into_path(),
            Err(e) => match e.path() {
                Some(p) => p.to_path_buf(),
                None => continue,
            },
        };

        if !path.is_dir() && has_extension(&path, extension) {
            sources.push(path);
        }
    }

    Ok(sources)
}

/// Case-insensitive extension match.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension.trim_start_matches('.')))
}
