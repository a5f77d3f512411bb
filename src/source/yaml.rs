//! YAML-backed tool source (experimental format)
//!
//! Backed by a `serde_yaml::Mapping`, which keeps keys in document order.
//! Declaration order is semantic here: downstream consumers derive argument
//! ordering from it, so nothing in this module may rehash the mapping into
//! an unordered container.

use super::{OutputSpec, ParamSpec, ParseError, SourceFormat, TestSpec, ToolSource};
use serde_yaml::{Mapping, Value};
use std::path::Path;

#[derive(Debug)]
pub struct YamlToolSource {
    document: Mapping,
}

impl YamlToolSource {
    pub fn new(document: Mapping) -> Self {
        Self { document }
    }

    /// Parse a YAML document that must be a mapping at top level.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ParseError> {
        let value: Value = serde_yaml::from_str(content).map_err(|source| ParseError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;

        match value {
            Value::Mapping(document) => Ok(Self::new(document)),
            _ => Err(ParseError::NotAMapping {
                path: path.to_path_buf(),
            }),
        }
    }

    /// The underlying ordered mapping
    pub fn document(&self) -> &Mapping {
        &self.document
    }

    fn str_field(&self, key: &str) -> Option<String> {
        self.document.get(key).and_then(scalar_to_string)
    }
}

/// Render a scalar value as a string (versions are often YAML numbers)
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn param_from_mapping(name: String, spec: &Value) -> ParamSpec {
    let mapping = spec.as_mapping();
    ParamSpec {
        name,
        kind: mapping
            .and_then(|m| m.get("type"))
            .and_then(scalar_to_string),
        label: mapping
            .and_then(|m| m.get("label"))
            .and_then(scalar_to_string),
    }
}

fn pairs_in_order(value: Option<&Value>) -> Vec<(String, String)> {
    let mapping = match value.and_then(|v| v.as_mapping()) {
        Some(m) => m,
        None => return Vec::new(),
    };
    mapping
        .iter()
        .filter_map(|(k, v)| {
            let key = scalar_to_string(k)?;
            let val = scalar_to_string(v)?;
            Some((key, val))
        })
        .collect()
}

impl ToolSource for YamlToolSource {
    fn format(&self) -> SourceFormat {
        SourceFormat::Yaml
    }

    fn tool_id(&self) -> Option<String> {
        self.str_field("id")
    }

    fn tool_name(&self) -> Option<String> {
        self.str_field("name")
    }

    fn version(&self) -> Option<String> {
        self.str_field("version")
    }

    fn description(&self) -> Option<String> {
        self.str_field("description")
    }

    fn command(&self) -> Option<String> {
        self.str_field("command").map(|c| c.trim().to_string())
    }

    fn interpreter(&self) -> Option<String> {
        self.str_field("interpreter")
    }

    fn help(&self) -> Option<String> {
        self.str_field("help")
    }

    fn inputs(&self) -> Vec<ParamSpec> {
        match self.document.get("inputs") {
            // List form: - name: input
            //              type: data
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(|item| {
                    let mapping = item.as_mapping()?;
                    let name = mapping.get("name").and_then(scalar_to_string)?;
                    Some(param_from_mapping(name, item))
                })
                .collect(),
            // Mapping form: key order is the declared argument order
            Some(Value::Mapping(m)) => m
                .iter()
                .filter_map(|(k, spec)| {
                    let name = scalar_to_string(k)?;
                    Some(param_from_mapping(name, spec))
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn outputs(&self) -> Vec<OutputSpec> {
        let mapping = match self.document.get("outputs").and_then(|v| v.as_mapping()) {
            Some(m) => m,
            None => return Vec::new(),
        };
        mapping
            .iter()
            .filter_map(|(k, spec)| {
                let name = scalar_to_string(k)?;
                let format = spec
                    .as_mapping()
                    .and_then(|m| m.get("format"))
                    .and_then(scalar_to_string);
                Some(OutputSpec { name, format })
            })
            .collect()
    }

    fn tests(&self) -> Vec<TestSpec> {
        let items = match self.document.get("tests").and_then(|v| v.as_sequence()) {
            Some(s) => s,
            None => return Vec::new(),
        };
        items
            .iter()
            .filter_map(|item| {
                let mapping = item.as_mapping()?;
                Some(TestSpec {
                    params: pairs_in_order(mapping.get("inputs")),
                    outputs: pairs_in_order(mapping.get("outputs")),
                })
            })
            .collect()
    }
}
