//! Command handlers wiring CLI arguments to the library

use std::path::PathBuf;
use tracing::error;

use super::commands::{ScanArgs, ShowArgs};
use super::output::{OutputFormatter, ScanReport, ToolDetail};
use crate::config::LoadOptions;
use crate::fs::RealFileSystem;
use crate::load::load_tool_sources;
use crate::source::parse_tool_source;

/// Run the `scan` subcommand. Returns the process exit code.
pub fn handle_scan(args: &ScanArgs) -> i32 {
    let options = match LoadOptions::from_env() {
        Ok(options) => options,
        Err(err) => {
            error!("{}", err);
            return 1;
        }
    };
    let env_beta = options.enable_beta_formats;
    let options = options
        .recursive(args.recursive)
        .beta_formats(args.beta_formats || env_beta)
        .register_load_errors(args.register_load_errors)
        .exclude_names(args.exclude.iter().cloned());

    let root = args
        .path
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let loaded = match load_tool_sources(&root, &options) {
        Ok(loaded) => loaded,
        Err(err) => {
            error!("{}", err);
            return 1;
        }
    };

    let report = ScanReport::new(&root, &loaded);
    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format_scan(&report) {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(err) => {
            error!("{}", err);
            1
        }
    }
}

/// Run the `show` subcommand. Returns the process exit code.
pub fn handle_show(args: &ShowArgs) -> i32 {
    let fs = RealFileSystem::new();

    let source = match parse_tool_source(&fs, &args.path, args.beta_formats) {
        Ok(source) => source,
        Err(err) => {
            error!("{}", err);
            return 1;
        }
    };

    let detail = ToolDetail::from_source(&args.path, source.as_ref());
    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format_tool(&detail) {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(err) => {
            error!("{}", err);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::OutputFormatArg;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_handle_scan_success() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("cat.xml"), "<tool id=\"cat\"/>").unwrap();

        let args = ScanArgs {
            path: Some(dir.path().to_path_buf()),
            recursive: false,
            beta_formats: false,
            register_load_errors: false,
            exclude: Vec::new(),
            format: OutputFormatArg::Json,
        };
        assert_eq!(handle_scan(&args), 0);
    }

    #[test]
    fn test_handle_scan_missing_path_fails() {
        let args = ScanArgs {
            path: Some(PathBuf::from("/no/such/dir")),
            recursive: false,
            beta_formats: false,
            register_load_errors: false,
            exclude: Vec::new(),
            format: OutputFormatArg::Human,
        };
        assert_eq!(handle_scan(&args), 1);
    }

    #[test]
    fn test_handle_show_success() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cat.xml");
        fs::write(&path, "<tool id=\"cat\" name=\"Concatenate\"/>").unwrap();

        let args = ShowArgs {
            path,
            beta_formats: false,
            format: OutputFormatArg::Human,
        };
        assert_eq!(handle_show(&args), 0);
    }

    #[test]
    fn test_handle_show_broken_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.xml");
        fs::write(&path, "<tool id=").unwrap();

        let args = ShowArgs {
            path,
            beta_formats: false,
            format: OutputFormatArg::Human,
        };
        assert_eq!(handle_show(&args), 1);
    }
}
