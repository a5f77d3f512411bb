//! Output formatting for scan and show results
//!
//! Two renderers: machine-readable JSON and human-readable text. The report
//! types flatten the polymorphic tool sources into plain serializable
//! structs so the JSON surface stays stable regardless of backing format.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::load::{LoadResult, LoadedTool};
use crate::source::{OutputSpec, ParamSpec, SourceFormat, TestSpec, ToolSource};

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// Human-readable formatted text
    Human,
}

/// Per-file outcome in a scan report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Parsed,
    Failed,
}

/// One scanned file, flattened for reporting
#[derive(Debug, Clone, Serialize)]
pub struct ToolReport {
    pub path: PathBuf,
    pub status: LoadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<SourceFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolReport {
    pub fn from_loaded(tool: &LoadedTool) -> Self {
        match &tool.result {
            LoadResult::Parsed(source) => Self {
                path: tool.path.clone(),
                status: LoadStatus::Parsed,
                format: Some(source.format()),
                id: source.tool_id(),
                name: source.tool_name(),
                version: source.version(),
                error: None,
            },
            LoadResult::Failed(failure) => Self {
                path: tool.path.clone(),
                status: LoadStatus::Failed,
                format: None,
                id: None,
                name: None,
                version: None,
                error: Some(failure.message.clone()),
            },
        }
    }
}

/// Full result of a scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub root: PathBuf,
    pub tools: Vec<ToolReport>,
}

impl ScanReport {
    pub fn new(root: &Path, loaded: &[LoadedTool]) -> Self {
        Self {
            root: root.to_path_buf(),
            tools: loaded.iter().map(ToolReport::from_loaded).collect(),
        }
    }
}

/// Full detail of a single parsed tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolDetail {
    pub path: PathBuf,
    pub format: SourceFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,
    pub inputs: Vec<ParamSpec>,
    pub outputs: Vec<OutputSpec>,
    pub tests: Vec<TestSpec>,
}

impl ToolDetail {
    pub fn from_source(path: &Path, source: &dyn ToolSource) -> Self {
        Self {
            path: path.to_path_buf(),
            format: source.format(),
            id: source.tool_id(),
            name: source.tool_name(),
            version: source.version(),
            description: source.description(),
            command: source.command(),
            interpreter: source.interpreter(),
            inputs: source.inputs(),
            outputs: source.outputs(),
            tests: source.tests(),
        }
    }
}

/// Output formatter for scan and show results
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_scan(&self, report: &ScanReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).context("Failed to serialize scan report")
            }
            OutputFormat::Human => Ok(Self::scan_human(report)),
        }
    }

    pub fn format_tool(&self, detail: &ToolDetail) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(detail).context("Failed to serialize tool detail")
            }
            OutputFormat::Human => Ok(Self::tool_human(detail)),
        }
    }

    fn scan_human(report: &ScanReport) -> String {
        let mut out = String::new();
        let parsed = report
            .tools
            .iter()
            .filter(|t| t.status == LoadStatus::Parsed)
            .count();
        let failed = report.tools.len() - parsed;

        out.push_str(&format!(
            "Scanned {}: {} tool(s), {} failure(s)\n",
            report.root.display(),
            parsed,
            failed
        ));

        for tool in &report.tools {
            match tool.status {
                LoadStatus::Parsed => {
                    out.push_str(&format!(
                        "  {}  [{}] {}{}\n",
                        tool.path.display(),
                        match tool.format {
                            Some(SourceFormat::Yaml) => "yaml",
                            _ => "xml",
                        },
                        tool.id.as_deref().unwrap_or("<no id>"),
                        tool.version
                            .as_deref()
                            .map(|v| format!(" v{}", v))
                            .unwrap_or_default(),
                    ));
                }
                LoadStatus::Failed => {
                    out.push_str(&format!(
                        "  {}  LOAD ERROR: {}\n",
                        tool.path.display(),
                        tool.error.as_deref().unwrap_or("unknown")
                    ));
                }
            }
        }

        out
    }

    fn tool_human(detail: &ToolDetail) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "{} ({:?})\n",
            detail.id.as_deref().unwrap_or("<no id>"),
            detail.format
        ));
        if let Some(name) = &detail.name {
            out.push_str(&format!("  name:        {}\n", name));
        }
        if let Some(version) = &detail.version {
            out.push_str(&format!("  version:     {}\n", version));
        }
        if let Some(description) = &detail.description {
            out.push_str(&format!("  description: {}\n", description));
        }
        if let Some(interpreter) = &detail.interpreter {
            out.push_str(&format!("  interpreter: {}\n", interpreter));
        }
        if let Some(command) = &detail.command {
            out.push_str(&format!("  command:     {}\n", command));
        }

        if !detail.inputs.is_empty() {
            out.push_str("  inputs:\n");
            for input in &detail.inputs {
                out.push_str(&format!(
                    "    - {}{}\n",
                    input.name,
                    input
                        .kind
                        .as_deref()
                        .map(|k| format!(" ({})", k))
                        .unwrap_or_default()
                ));
            }
        }

        if !detail.outputs.is_empty() {
            out.push_str("  outputs:\n");
            for output in &detail.outputs {
                out.push_str(&format!(
                    "    - {}{}\n",
                    output.name,
                    output
                        .format
                        .as_deref()
                        .map(|f| format!(" ({})", f))
                        .unwrap_or_default()
                ));
            }
        }

        if !detail.tests.is_empty() {
            out.push_str(&format!("  tests:       {}\n", detail.tests.len()));
        }

        out
    }
}
