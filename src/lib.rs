//! toolscout - tool-definition discovery, classification and parsing
//!
//! This library finds candidate tool-definition files in a directory tree,
//! decides which of them plausibly are tools without fully parsing them,
//! and parses the survivors into a format-agnostic representation.
//!
//! # Core Concepts
//!
//! - **Scanning**: enumerate candidate files under a path - a single file,
//!   the immediate `*.xml` children of a directory, or a full recursive walk
//! - **Classification**: cheap tool-likeness filtering based on extensions,
//!   content sniffing and a bounded-prefix search for an opening tool tag
//! - **Tool Sources**: format-agnostic accessors over parsed definitions,
//!   backed by XML (default) or YAML (experimental, opt-in)
//!
//! # Example Usage
//!
//! ```no_run
//! use toolscout::{load_tool_sources, LoadOptions};
//! use std::path::Path;
//!
//! fn list_tools(tools_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
//!     let options = LoadOptions::new().recursive(true);
//!     for tool in load_tool_sources(tools_dir, &options)? {
//!         if let Some(source) = tool.result.source() {
//!             println!("{}: {:?}", tool.path.display(), source.tool_id());
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`scan`]: candidate file discovery
//! - [`classify`]: tool-likeness heuristics
//! - [`source`]: format dispatch and tool-source accessors
//! - [`load`]: batch loading over the three layers above
//!
//! # Error Handling
//!
//! Only structurally invalid requests (nonexistent path, recursion over a
//! single file) fail a call. Unreadable files are skipped during
//! classification, and files that fail to parse are reported per file
//! without aborting the batch.

// Public modules
pub mod classify;
pub mod cli;
pub mod config;
pub mod fs;
pub mod load;
pub mod scan;
pub mod sniff;
pub mod source;

// Re-export key types for convenient access
pub use classify::{looks_like_a_tool_xml, ToolCheck, ToolClassifier, YamlToolCheck};
pub use config::{ConfigError, LoadOptions};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use load::{load_tool_sources, load_tool_sources_with_handler, LoadResult, LoadedTool};
pub use scan::{find_tool_files, ScanError};
pub use source::{parse_tool_source, ParseError, SourceFormat, ToolSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_toolscout() {
        assert_eq!(NAME, "toolscout");
    }
}
