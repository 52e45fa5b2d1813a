//! Source file discovery and scratch directory setup
//!
//! Both run before the loader touches the store, so a bad path aborts a
//! load with the index untouched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lexset_core::{LexsetError, LexsetResult};

/// List the regular files directly inside `dir`
///
/// Subdirectories are skipped; symlinks to regular files are included.
/// The result is sorted by path so repeated runs visit files in the same
/// order, though nothing about the final index depends on that order.
///
/// # Errors
///
/// - `SourceNotFound` if `dir` does not exist
/// - `NotADirectory` if `dir` exists but is not a directory
/// - `Io` if the directory cannot be listed
pub fn discover_files(dir: &Path) -> LexsetResult<Vec<PathBuf>> {
    let meta = match fs::metadata(dir) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(LexsetError::SourceNotFound {
                path: dir.to_path_buf(),
            })
        }
        Err(e) => return Err(LexsetError::io(dir, e)),
    };
    if !meta.is_dir() {
        return Err(LexsetError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| LexsetError::io(dir, e))? {
        let path = entry.map_err(|e| LexsetError::io(dir, e))?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Make sure the scratch directory exists, creating parents as needed
///
/// # Errors
///
/// Returns a configuration error naming the path if it cannot be created
/// or exists as something other than a directory.
pub fn ensure_scratch_dir(path: &Path) -> LexsetResult<()> {
    if path.exists() {
        if path.is_dir() {
            return Ok(());
        }
        return Err(LexsetError::configuration(format!(
            "Scratch path '{}' is not a directory",
            path.display()
        )));
    }
    fs::create_dir_all(path).map_err(|e| {
        LexsetError::configuration(format!(
            "Can't make scratch directory '{}': {}",
            path.display(),
            e
        ))
    })
}
