//! Candidate file discovery
//!
//! Given a path and a recursive flag, produce the set of plausible
//! tool-definition files as absolute paths. Only structurally invalid
//! requests (nonexistent path, recursion over a single file) are hard
//! errors; unreadable entries inside a directory walk are logged and
//! skipped so one bad file never sinks a scan.

use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised for structurally invalid scan requests
#[derive(Debug, Error)]
pub enum ScanError {
    /// The requested path does not exist
    #[error("Could not load tools from path {path:?} - this path does not exist")]
    PathNotFound { path: PathBuf },

    /// A single file was combined with the recursive flag
    #[error("Cannot specify a single file and recursive (path {path:?})")]
    RecursiveSingleFile { path: PathBuf },

    /// The path could not be listed or normalized
    #[error("Failed to read path {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Find plausible tool-definition files under `path`.
///
/// A single file is returned as the sole candidate regardless of its
/// extension; classification happens later. Directories yield their `.xml`
/// children - immediate children only, or the full subtree when
/// `recursive` is set. All results are absolute and sorted.
pub fn find_tool_files(path: &Path, recursive: bool) -> Result<Vec<PathBuf>, ScanError> {
    if !path.exists() {
        return Err(ScanError::PathNotFound {
            path: path.to_path_buf(),
        });
    }

    let is_file = !path.is_dir();
    if is_file && recursive {
        return Err(ScanError::RecursiveSingleFile {
            path: path.to_path_buf(),
        });
    }

    let root = path.canonicalize().map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if is_file {
        return Ok(vec![root]);
    }

    let mut files = if recursive {
        walk_subtree(&root)
    } else {
        list_children(&root)?
    };

    files.sort();
    debug!(
        path = %root.display(),
        recursive,
        candidates = files.len(),
        "Tool file discovery finished"
    );
    Ok(files)
}

fn has_xml_name(name: &str) -> bool {
    name.ends_with(".xml")
}

fn list_children(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let entries = fs::read_dir(root).map_err(|source| ScanError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "Failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if has_xml_name(name) {
                files.push(path);
            }
        }
    }
    Ok(files)
}

fn walk_subtree(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    // Plain filesystem walk: tool directories are not git working trees,
    // so gitignore and hidden-file filtering are all switched off.
    for result in WalkBuilder::new(root)
        .hidden(false)
        .ignore(false)
        .parents(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .build()
    {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "Failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if has_xml_name(name) {
                files.push(path.to_path_buf());
            }
        }
    }

    files
}
