use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively collect files under `start` whose path contains `filter`.
///
/// Symlinks are not followed. A missing directory is logged and yields no files.
pub fn find_files_in_dir(start: &Path, filter: &str) -> anyhow::Result<Vec<PathBuf>> {
    if !start.exists() {
        log::warn!("No directory found: {}", start.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(start).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && entry.path().to_string_lossy().contains(filter) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
