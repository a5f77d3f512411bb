//! Format-agnostic accessors over parsed tool definitions
//!
//! A [`ToolSource`] hides whether a tool definition came from the default
//! XML format or the experimental YAML format. Consumers query metadata,
//! input parameters, outputs and tests through the same interface.
//!
//! # Example
//!
//! ```no_run
//! use toolscout::fs::RealFileSystem;
//! use toolscout::source::parse_tool_source;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fs = RealFileSystem::new();
//! let source = parse_tool_source(&fs, Path::new("cat.xml"), false)?;
//! println!("{}", source.tool_id().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

mod factory;
mod xml;
mod yaml;

pub use factory::{input_source, parse_tool_source};
pub use xml::{XmlElement, XmlInputSource, XmlToolSource};
pub use yaml::YamlToolSource;

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while parsing a single tool-definition file
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file could not be read
    #[error("Failed to read tool file {path:?}: {cause}")]
    Io {
        path: PathBuf,
        cause: anyhow::Error,
    },

    /// The file is not well-formed XML
    #[error("Invalid XML in {path:?}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// The file is not well-formed YAML
    #[error("Invalid YAML in {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The YAML document is not a mapping at top level
    #[error("Tool definition in {path:?} is not a mapping")]
    NotAMapping { path: PathBuf },
}

/// The concrete format backing a tool source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Xml,
    Yaml,
}

/// An input parameter declared by a tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: String,
    /// Parameter type as declared (`text`, `integer`, `data`, ...)
    pub kind: Option<String>,
    pub label: Option<String>,
}

/// An output dataset declared by a tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputSpec {
    pub name: String,
    pub format: Option<String>,
}

/// A functional test declared by a tool
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestSpec {
    /// (param name, value) pairs in declaration order
    pub params: Vec<(String, String)>,
    /// (output name, expected file) pairs in declaration order
    pub outputs: Vec<(String, String)>,
}

/// Format-agnostic accessor over a parsed tool definition
pub trait ToolSource: std::fmt::Debug {
    fn format(&self) -> SourceFormat;

    fn tool_id(&self) -> Option<String>;

    fn tool_name(&self) -> Option<String>;

    fn version(&self) -> Option<String>;

    fn description(&self) -> Option<String>;

    /// The command template, stripped of surrounding whitespace
    fn command(&self) -> Option<String>;

    /// Interpreter for the command, when one is declared
    fn interpreter(&self) -> Option<String>;

    fn help(&self) -> Option<String>;

    /// Input parameters in declaration order
    fn inputs(&self) -> Vec<ParamSpec>;

    /// Output datasets in declaration order
    fn outputs(&self) -> Vec<OutputSpec>;

    fn tests(&self) -> Vec<TestSpec>;
}
