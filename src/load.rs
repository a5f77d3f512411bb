//! Batch loading of tool sources from a directory tree
//!
//! Glue over the scanner, classifier and factory: discover candidates,
//! keep the ones that look like tools, parse each one. A file that fails
//! to parse is reported through the error handler and either dropped or
//! recorded as a [`LoadResult::Failed`] entry - it never aborts the rest
//! of the batch.

use crate::classify::ToolClassifier;
use crate::config::LoadOptions;
use crate::fs::RealFileSystem;
use crate::scan::{find_tool_files, ScanError};
use crate::source::{parse_tool_source, ParseError, ToolSource};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Details of a parse failure recorded in a batch result
#[derive(Debug, Clone, Serialize)]
pub struct LoadFailure {
    pub message: String,
}

impl From<&ParseError> for LoadFailure {
    fn from(error: &ParseError) -> Self {
        Self {
            message: error.to_string(),
        }
    }
}

/// Outcome of one parse attempt
#[derive(Debug)]
pub enum LoadResult {
    Parsed(Box<dyn ToolSource>),
    Failed(LoadFailure),
}

impl LoadResult {
    pub fn is_failure(&self) -> bool {
        matches!(self, LoadResult::Failed(_))
    }

    pub fn source(&self) -> Option<&dyn ToolSource> {
        match self {
            LoadResult::Parsed(source) => Some(source.as_ref()),
            LoadResult::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&LoadFailure> {
        match self {
            LoadResult::Parsed(_) => None,
            LoadResult::Failed(failure) => Some(failure),
        }
    }
}

/// One attempted tool file in a batch result
#[derive(Debug)]
pub struct LoadedTool {
    pub path: PathBuf,
    pub result: LoadResult,
}

/// Default error handler: log and move on.
pub fn default_load_handler(path: &Path, error: &ParseError) {
    warn!(path = %path.display(), error = %error, "Failed to load tool");
}

/// Load every tool-like file under `path`, reporting failures via
/// [`default_load_handler`].
pub fn load_tool_sources(path: &Path, options: &LoadOptions) -> Result<Vec<LoadedTool>, ScanError> {
    load_tool_sources_with_handler(path, options, default_load_handler)
}

/// Load every tool-like file under `path` with a caller-supplied error
/// handler. Only structurally invalid requests fail the whole call.
pub fn load_tool_sources_with_handler(
    path: &Path,
    options: &LoadOptions,
    mut on_error: impl FnMut(&Path, &ParseError),
) -> Result<Vec<LoadedTool>, ScanError> {
    let fs = RealFileSystem::new();

    let mut classifier = if options.enable_beta_formats {
        ToolClassifier::with_beta_formats()
    } else {
        ToolClassifier::new()
    };
    classifier = classifier.exclude_names(options.exclude_names.iter().cloned());

    let mut loaded = Vec::new();
    for file in find_tool_files(path, options.recursive)? {
        if !classifier.looks_like_a_tool(&fs, &file) {
            debug!(path = %file.display(), "Candidate does not look like a tool");
            continue;
        }

        match parse_tool_source(&fs, &file, options.enable_beta_formats) {
            Ok(source) => loaded.push(LoadedTool {
                path: file,
                result: LoadResult::Parsed(source),
            }),
            Err(error) => {
                on_error(&file, &error);
                if options.register_load_errors {
                    loaded.push(LoadedTool {
                        path: file,
                        result: LoadResult::Failed(LoadFailure::from(&error)),
                    });
                }
            }
        }
    }

    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // Two parseable tools, one tool-like file with broken XML, and two
    // files that should never reach the parser.
    fn create_mixed_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::write(base.join("cat.xml"), "<tool id=\"cat\" name=\"Concatenate\"/>").unwrap();
        fs::write(base.join("sort.xml"), "<tool id=\"sort\" name=\"Sort\"/>").unwrap();
        fs::write(base.join("broken.xml"), "<tool id=\"broken\" name=").unwrap();
        fs::write(base.join("readme.xml"), "<readme>no tools here</readme>").unwrap();
        fs::write(base.join("notes.txt"), "plain text").unwrap();

        dir
    }

    #[test]
    fn test_failures_dropped_by_default() {
        let dir = create_mixed_dir();
        let options = LoadOptions::new();

        let loaded = load_tool_sources(dir.path(), &options).unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.iter().all(|t| !t.result.is_failure()));
    }

    #[test]
    fn test_failures_recorded_when_registered() {
        let dir = create_mixed_dir();
        let options = LoadOptions::new().register_load_errors(true);

        let loaded = load_tool_sources(dir.path(), &options).unwrap();
        assert_eq!(loaded.len(), 3);

        let failures: Vec<_> = loaded.iter().filter(|t| t.result.is_failure()).collect();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].path.ends_with("broken.xml"));
        assert!(failures[0].result.failure().unwrap().message.contains("Invalid XML"));
    }

    #[test]
    fn test_handler_called_once_per_failure() {
        let dir = create_mixed_dir();
        let options = LoadOptions::new();

        let mut reported = Vec::new();
        let loaded = load_tool_sources_with_handler(dir.path(), &options, |path, _err| {
            reported.push(path.to_path_buf());
        })
        .unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(reported.len(), 1);
        assert!(reported[0].ends_with("broken.xml"));
    }

    #[test]
    fn test_parsed_sources_are_queryable() {
        let dir = create_mixed_dir();
        let options = LoadOptions::new();

        let loaded = load_tool_sources(dir.path(), &options).unwrap();
        let ids: Vec<String> = loaded
            .iter()
            .filter_map(|t| t.result.source())
            .filter_map(|s| s.tool_id())
            .collect();
        assert_eq!(ids, vec!["cat", "sort"]);
    }

    #[test]
    fn test_excluded_names_skip_parsing() {
        let dir = create_mixed_dir();
        let options = LoadOptions::new().exclude_names(["cat.xml"]);

        let loaded = load_tool_sources(dir.path(), &options).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].path.ends_with("sort.xml"));
    }

    #[test]
    fn test_beta_formats_pick_up_yaml_in_single_file_mode() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("cat.yml");
        fs::write(&file, "class: GalaxyTool\nid: cat\n").unwrap();

        // A single-file load bypasses the directory glob, so a .yml path
        // flows straight to the classifier.
        let options = LoadOptions::new().beta_formats(true);
        let loaded = load_tool_sources(&file, &options).unwrap();
        assert_eq!(loaded.len(), 1);
        let source = loaded[0].result.source().unwrap();
        assert_eq!(source.tool_id().as_deref(), Some("cat"));
    }

    #[test]
    fn test_scan_errors_propagate() {
        let options = LoadOptions::new();
        let err = load_tool_sources(Path::new("/no/such/dir"), &options).unwrap_err();
        assert!(matches!(err, ScanError::PathNotFound { .. }));
    }
}
