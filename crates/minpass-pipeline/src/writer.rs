//! File writing for build output and in-place minification.
//!
//! - **Path validation**: artifact names are resolved inside the output
//!   directory; names that escape it are rejected.
//! - **Atomic writes**: content goes to a sibling temp file that is renamed
//!   over the target, so readers never observe a half-written artifact.
//! - **Rollback**: a batch write removes every temp file if any write fails.

use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::{Error, Result};

/// Resolve `filename` inside `base_dir`.
///
/// # Security
///
/// Rejects null bytes and any name that, once cleaned and joined with the
/// base directory, would land outside of it (`../x`, `a/../../x`, `/etc/x`).
pub fn validate_output_path(base_dir: &Path, filename: &str) -> Result<PathBuf> {
    if filename.contains('\0') {
        return Err(Error::InvalidOutputPath(
            "Filename contains null byte".to_string(),
        ));
    }

    let base_dir = base_dir.to_path_buf().clean();
    let filename_path = Path::new(filename).clean();
    let full_path = base_dir.join(&filename_path).clean();

    if !full_path.starts_with(&base_dir) || full_path == base_dir {
        return Err(Error::InvalidOutputPath(format!(
            "Path '{}' escapes output directory '{}' (resolved to '{}')",
            filename,
            base_dir.display(),
            full_path.display()
        )));
    }

    Ok(full_path)
}

/// Write one file atomically, creating parent directories as needed.
pub fn write_file_atomic(path: &Path, content: &[u8]) -> Result<()> {
    write_files_atomic(&[(path.to_path_buf(), content)])
}

/// Write build artifacts below `dir`, all or nothing.
pub fn write_artifacts(dir: &Path, artifacts: &[(&str, &[u8])]) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| {
        Error::WriteFailure(format!(
            "Failed to create output directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let operations = artifacts
        .iter()
        .map(|(name, content)| Ok((validate_output_path(dir, name)?, *content)))
        .collect::<Result<Vec<_>>>()?;

    write_files_atomic(&operations)
}

/// Remove every entry inside `dir`, keeping the directory itself.
pub fn empty_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".minpass.tmp");
    target.with_file_name(name)
}

fn write_files_atomic(operations: &[(PathBuf, &[u8])]) -> Result<()> {
    let mut temp_files = Vec::new();

    for (target_path, content) in operations {
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                cleanup_temp_files(&temp_files);
                Error::WriteFailure(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp_path = temp_path_for(target_path);
        fs::write(&temp_path, content).map_err(|e| {
            cleanup_temp_files(&temp_files);
            Error::WriteFailure(format!(
                "Failed to write temporary file '{}': {}",
                temp_path.display(),
                e
            ))
        })?;

        temp_files.push((temp_path, target_path.clone()));
    }

    for (temp_path, target_path) in &temp_files {
        fs::rename(temp_path, target_path).map_err(|e| {
            cleanup_temp_files(&temp_files);
            Error::WriteFailure(format!(
                "Failed to rename '{}' to '{}': {}",
                temp_path.display(),
                target_path.display(),
                e
            ))
        })?;
    }

    Ok(())
}

// Best effort: we are already on an error path.
fn cleanup_temp_files(temp_files: &[(PathBuf, PathBuf)]) {
    for (temp_path, _) in temp_files {
        if temp_path.exists() {
            if let Err(e) = fs::remove_file(temp_path) {
                tracing::warn!(
                    path = %temp_path.display(),
                    error = %e,
                    "Failed to clean up temporary file"
                );
            }
        }
    }
}
