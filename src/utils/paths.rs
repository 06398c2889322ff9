use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use walkdir::WalkDir;

// Maximum size of a single server log: 512MB
const MAX_FILE_SIZE_BYTES: u64 = 512 * 1024 * 1024;

/// Extension of server log files picked up when walking directories
const LOG_EXTENSION: &str = "log";

/// Validates that a file's size is within acceptable limits (512MB)
///
/// Takes an open file handle so the size checked is the size of the file
/// that will actually be read.
///
/// # Errors
///
/// Returns an error if:
/// - The file metadata cannot be read
/// - The file is larger than 512MB
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_FILE_SIZE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_FILE_SIZE_BYTES
        );
    }

    Ok(())
}

/// Expands the given paths into a sorted list of log files
///
/// Files are taken as-is whatever their extension. Directories are walked
/// recursively for `*.log` files. A file reached twice is listed once, at
/// its first position.
///
/// # Errors
///
/// Returns an error if a path does not exist or a directory cannot be walked.
pub fn discover_log_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            bail!("Log path not found: {}", path.display());
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(path) {
            let entry = entry
                .with_context(|| format!("Failed to walk log directory: {}", path.display()))?;
            let is_log = entry.path().extension().is_some_and(|ext| ext == LOG_EXTENSION);
            if entry.file_type().is_file() && is_log {
                found.push(entry.into_path());
            }
        }
        found.sort();
        files.extend(found);
    }

    let mut seen = HashSet::new();
    files.retain(|file| seen.insert(file.clone()));

    Ok(files)
}
