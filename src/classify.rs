//! Tool-likeness classification
//!
//! Decides whether a file plausibly represents a tool definition without
//! fully parsing it. Serves as a filter: all valid tools must look like a
//! tool, but not everything that looks like a tool is a valid tool. The
//! XML heuristic reads a bounded prefix only, so classifying a large or
//! malformed file never costs a full read.
//!
//! Beta formats are matched by an explicit ordered list of [`ToolCheck`]
//! strategies held by the classifier - there is no global registry. The
//! default list contains the YAML checker alone.

use crate::fs::FileSystem;
use crate::sniff;
use anyhow::Result;
use regex::bytes::Regex;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Bounded prefix read when sniffing for an opening tool element (5 KB).
pub const TOOL_SNIFF_PREFIX_BYTES: usize = 5 * 1024;

/// Class marker a YAML/JSON definition must carry at top level.
const YAML_TOOL_CLASS: &str = "GalaxyTool";

/// A beta-format tool-likeness check
pub trait ToolCheck: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Whether the file plausibly holds a tool definition in this format.
    ///
    /// I/O failures are propagated; the classifier treats them as
    /// "does not look like a tool" and moves on.
    fn matches(&self, fs: &dyn FileSystem, path: &Path) -> Result<bool>;
}

/// YAML/JSON checker: a top-level mapping whose `class` is `GalaxyTool`
pub struct YamlToolCheck;

impl ToolCheck for YamlToolCheck {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn matches(&self, fs: &dyn FileSystem, path: &Path) -> Result<bool> {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => return Ok(false),
        };
        if !name.ends_with(".yml") && !name.ends_with(".json") {
            return Ok(false);
        }

        let content = fs.read_to_string(path)?;

        // The YAML parser covers both extensions; JSON is a YAML subset here.
        let value: serde_yaml::Value = match serde_yaml::from_str(&content) {
            Ok(v) => v,
            Err(_) => return Ok(false),
        };

        let mapping = match value.as_mapping() {
            Some(m) => m,
            None => return Ok(false),
        };

        Ok(mapping
            .get("class")
            .and_then(|v| v.as_str())
            .map(|class| class == YAML_TOOL_CLASS)
            .unwrap_or(false))
    }
}

/// The beta checkers applied by default: YAML only.
pub fn default_beta_checks() -> Vec<Box<dyn ToolCheck>> {
    vec![Box::new(YamlToolCheck)]
}

/// Classifier combining the always-on XML heuristic with optional beta checks
pub struct ToolClassifier {
    invalid_names: HashSet<String>,
    beta_checks: Vec<Box<dyn ToolCheck>>,
}

impl ToolClassifier {
    /// XML-only classification, no beta formats.
    pub fn new() -> Self {
        Self {
            invalid_names: HashSet::new(),
            beta_checks: Vec::new(),
        }
    }

    /// XML plus the default beta checker list.
    pub fn with_beta_formats() -> Self {
        Self::with_checks(default_beta_checks())
    }

    /// XML plus an explicit ordered list of beta checkers.
    pub fn with_checks(beta_checks: Vec<Box<dyn ToolCheck>>) -> Self {
        Self {
            invalid_names: HashSet::new(),
            beta_checks,
        }
    }

    /// Reject files by base name before any content inspection.
    ///
    /// Used to quickly rule out common repository boilerplate files that
    /// share the `.xml` extension.
    pub fn exclude_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.invalid_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether `path` plausibly represents a tool definition.
    ///
    /// Never fails: any I/O error while sniffing demotes the file to
    /// "not a tool" so directory scans stay resilient to unreadable files.
    pub fn looks_like_a_tool(&self, fs: &dyn FileSystem, path: &Path) -> bool {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if self.invalid_names.contains(name) {
                return false;
            }
        }

        match looks_like_a_tool_xml(fs, path) {
            Ok(true) => return true,
            Ok(false) => {}
            Err(err) => {
                debug!(path = %path.display(), error = %err, "Skipping unreadable candidate");
                return false;
            }
        }

        for check in &self.beta_checks {
            match check.matches(fs, path) {
                Ok(true) => return true,
                Ok(false) => {}
                Err(err) => {
                    debug!(
                        path = %path.display(),
                        checker = check.name(),
                        error = %err,
                        "Beta checker could not read candidate"
                    );
                }
            }
        }

        false
    }
}

impl Default for ToolClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// XML heuristic: a non-empty, non-archive, non-binary `.xml` file with an
/// opening `<tool` element tag within the first 5 KB.
pub fn looks_like_a_tool_xml(fs: &dyn FileSystem, path: &Path) -> Result<bool> {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => return Ok(false),
    };
    if !name.ends_with(".xml") {
        return Ok(false);
    }

    if fs.file_size(path)? == 0 {
        return Ok(false);
    }

    let prefix = fs.read_prefix(path, TOOL_SNIFF_PREFIX_BYTES)?;

    if sniff::is_binary(&prefix)
        || sniff::is_image(&prefix)
        || sniff::is_gzip(&prefix)
        || sniff::is_bzip2(&prefix)
        || sniff::is_zip(&prefix)
    {
        return Ok(false);
    }

    let tool_re = Regex::new(r"<tool\s").expect("valid regex");
    Ok(tool_re.is_match(&prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use std::path::PathBuf;

    fn mock() -> MockFileSystem {
        MockFileSystem::with_root(PathBuf::from("/tools"))
    }

    #[test]
    fn test_xml_tool_accepted() {
        let fs = mock();
        fs.add_file("cat.xml", "<tool id=\"cat\" name=\"Concatenate\">\n</tool>\n");

        let classifier = ToolClassifier::new();
        assert!(classifier.looks_like_a_tool(&fs, Path::new("/tools/cat.xml")));
    }

    #[test]
    fn test_wrong_extension_rejected() {
        let fs = mock();
        fs.add_file("cat.txt", "<tool id=\"cat\"/>");

        let classifier = ToolClassifier::new();
        assert!(!classifier.looks_like_a_tool(&fs, Path::new("/tools/cat.txt")));
    }

    #[test]
    fn test_empty_xml_rejected() {
        let fs = mock();
        fs.add_file("empty.xml", "");

        let classifier = ToolClassifier::new();
        assert!(!classifier.looks_like_a_tool(&fs, Path::new("/tools/empty.xml")));
    }

    #[test]
    fn test_gzip_masquerading_as_xml_rejected() {
        let fs = mock();
        let mut content = vec![0x1f, 0x8b, 0x08, 0x00];
        content.extend_from_slice(b"<tool compressed payload");
        fs.add_binary("packed.xml", &content);

        let classifier = ToolClassifier::new();
        assert!(!classifier.looks_like_a_tool(&fs, Path::new("/tools/packed.xml")));
    }

    #[test]
    fn test_zip_and_bzip2_rejected() {
        let fs = mock();
        fs.add_binary("a.xml", &[0x50, 0x4b, 0x03, 0x04, b'<', b't']);
        fs.add_binary("b.xml", b"BZh91AY<tool ");

        let classifier = ToolClassifier::new();
        assert!(!classifier.looks_like_a_tool(&fs, Path::new("/tools/a.xml")));
        assert!(!classifier.looks_like_a_tool(&fs, Path::new("/tools/b.xml")));
    }

    #[test]
    fn test_binary_content_rejected() {
        let fs = mock();
        fs.add_binary("blob.xml", b"<tool \x00\x01\x02");

        let classifier = ToolClassifier::new();
        assert!(!classifier.looks_like_a_tool(&fs, Path::new("/tools/blob.xml")));
    }

    #[test]
    fn test_tool_tag_within_prefix_accepted() {
        let fs = mock();
        let mut content = "<!-- ".to_string();
        content.push_str(&"x".repeat(4000));
        content.push_str(" -->\n<tool id=\"late\">");
        fs.add_file("late.xml", &content);

        let classifier = ToolClassifier::new();
        assert!(classifier.looks_like_a_tool(&fs, Path::new("/tools/late.xml")));
    }

    #[test]
    fn test_tool_tag_past_prefix_rejected() {
        let fs = mock();
        let mut content = "<!-- ".to_string();
        content.push_str(&"x".repeat(TOOL_SNIFF_PREFIX_BYTES));
        content.push_str(" -->\n<tool id=\"too-late\">");
        fs.add_file("late.xml", &content);

        let classifier = ToolClassifier::new();
        assert!(!classifier.looks_like_a_tool(&fs, Path::new("/tools/late.xml")));
    }

    #[test]
    fn test_tool_tag_requires_trailing_whitespace() {
        let fs = mock();
        fs.add_file("bad.xml", "<toolbox><nothing/></toolbox>");

        let classifier = ToolClassifier::new();
        assert!(!classifier.looks_like_a_tool(&fs, Path::new("/tools/bad.xml")));
    }

    #[test]
    fn test_excluded_name_rejected_before_content() {
        let fs = mock();
        fs.add_file("tool_dependencies.xml", "<tool id=\"x\" />");

        let classifier = ToolClassifier::new().exclude_names(["tool_dependencies.xml"]);
        assert!(!classifier.looks_like_a_tool(&fs, Path::new("/tools/tool_dependencies.xml")));
    }

    #[test]
    fn test_missing_file_is_not_a_tool() {
        let fs = mock();
        let classifier = ToolClassifier::new();
        assert!(!classifier.looks_like_a_tool(&fs, Path::new("/tools/ghost.xml")));
    }

    #[test]
    fn test_yaml_tool_needs_beta_formats() {
        let fs = mock();
        fs.add_file("cat.yml", "class: GalaxyTool\nid: cat\n");

        let xml_only = ToolClassifier::new();
        assert!(!xml_only.looks_like_a_tool(&fs, Path::new("/tools/cat.yml")));

        let with_beta = ToolClassifier::with_beta_formats();
        assert!(with_beta.looks_like_a_tool(&fs, Path::new("/tools/cat.yml")));
    }

    #[test]
    fn test_yaml_wrong_class_rejected() {
        let fs = mock();
        fs.add_file("other.yml", "class: SomethingElse\nid: other\n");

        let classifier = ToolClassifier::with_beta_formats();
        assert!(!classifier.looks_like_a_tool(&fs, Path::new("/tools/other.yml")));
    }

    #[test]
    fn test_json_evaluated_by_same_rule() {
        let fs = mock();
        fs.add_file("cat.json", "{\"class\": \"GalaxyTool\", \"id\": \"cat\"}");
        fs.add_file("other.json", "{\"class\": \"Workflow\"}");

        let classifier = ToolClassifier::with_beta_formats();
        assert!(classifier.looks_like_a_tool(&fs, Path::new("/tools/cat.json")));
        assert!(!classifier.looks_like_a_tool(&fs, Path::new("/tools/other.json")));
    }

    #[test]
    fn test_yaml_non_mapping_rejected() {
        let fs = mock();
        fs.add_file("list.yml", "- one\n- two\n");

        let classifier = ToolClassifier::with_beta_formats();
        assert!(!classifier.looks_like_a_tool(&fs, Path::new("/tools/list.yml")));
    }

    #[test]
    fn test_malformed_yaml_rejected_not_surfaced() {
        let fs = mock();
        fs.add_file("broken.yml", "class: [unclosed\n  nested: ]: bad");

        let classifier = ToolClassifier::with_beta_formats();
        assert!(!classifier.looks_like_a_tool(&fs, Path::new("/tools/broken.yml")));
    }

    #[test]
    fn test_yaml_extension_not_accepted() {
        let fs = mock();
        fs.add_file("cat.yaml", "class: GalaxyTool\n");

        let classifier = ToolClassifier::with_beta_formats();
        assert!(!classifier.looks_like_a_tool(&fs, Path::new("/tools/cat.yaml")));
    }
}
