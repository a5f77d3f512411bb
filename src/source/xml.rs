//! XML-backed tool source
//!
//! `roxmltree` documents borrow from the input buffer, so the parse is
//! converted once into an owned [`XmlElement`] tree that sources and input
//! accessors can hand around freely.

use super::{OutputSpec, ParamSpec, ParseError, SourceFormat, TestSpec, ToolSource};
use std::path::Path;

/// An owned XML element: name, attributes and children in document order
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Parse a document and return its root element.
    pub fn parse(xml: &str, path: &Path) -> Result<Self, ParseError> {
        let doc = roxmltree::Document::parse(xml).map_err(|source| ParseError::Xml {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_node(doc.root_element()))
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let attributes = node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();

        let mut text = String::new();
        let mut children = Vec::new();
        for child in node.children() {
            if child.is_element() {
                children.push(Self::from_node(child));
            } else if child.is_text() {
                text.push_str(child.text().unwrap_or(""));
            }
        }

        Self {
            name: node.tag_name().name().to_string(),
            attributes,
            text,
            children,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Direct text content, surrounding whitespace stripped
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// First child element with the given tag name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All child elements with the given tag name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }
}

/// Tool source over the root `<tool>` element
#[derive(Debug)]
pub struct XmlToolSource {
    root: XmlElement,
}

impl XmlToolSource {
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }

    /// The underlying root element
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    fn child_text(&self, name: &str) -> Option<String> {
        self.root.child(name).map(|c| c.text().to_string())
    }
}

impl ToolSource for XmlToolSource {
    fn format(&self) -> SourceFormat {
        SourceFormat::Xml
    }

    fn tool_id(&self) -> Option<String> {
        self.root.attr("id").map(String::from)
    }

    fn tool_name(&self) -> Option<String> {
        self.root.attr("name").map(String::from)
    }

    fn version(&self) -> Option<String> {
        self.root.attr("version").map(String::from)
    }

    fn description(&self) -> Option<String> {
        self.child_text("description")
    }

    fn command(&self) -> Option<String> {
        self.child_text("command")
    }

    fn interpreter(&self) -> Option<String> {
        self.root
            .child("command")
            .and_then(|c| c.attr("interpreter"))
            .map(String::from)
    }

    fn help(&self) -> Option<String> {
        self.child_text("help")
    }

    fn inputs(&self) -> Vec<ParamSpec> {
        let section = match self.root.child("inputs") {
            Some(s) => s,
            None => return Vec::new(),
        };
        section
            .children_named("param")
            .map(|p| ParamSpec {
                name: p.attr("name").unwrap_or_default().to_string(),
                kind: p.attr("type").map(String::from),
                label: p.attr("label").map(String::from),
            })
            .collect()
    }

    fn outputs(&self) -> Vec<OutputSpec> {
        let section = match self.root.child("outputs") {
            Some(s) => s,
            None => return Vec::new(),
        };
        section
            .children_named("data")
            .map(|o| OutputSpec {
                name: o.attr("name").unwrap_or_default().to_string(),
                format: o.attr("format").map(String::from),
            })
            .collect()
    }

    fn tests(&self) -> Vec<TestSpec> {
        let section = match self.root.child("tests") {
            Some(s) => s,
            None => return Vec::new(),
        };
        section
            .children_named("test")
            .map(|t| TestSpec {
                params: t
                    .children_named("param")
                    .map(|p| {
                        (
                            p.attr("name").unwrap_or_default().to_string(),
                            p.attr("value").unwrap_or_default().to_string(),
                        )
                    })
                    .collect(),
                outputs: t
                    .children_named("output")
                    .map(|o| {
                        (
                            o.attr("name").unwrap_or_default().to_string(),
                            o.attr("file").unwrap_or_default().to_string(),
                        )
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Accessor over one `<param>`-style element inside an input section
#[derive(Debug, Clone, PartialEq)]
pub struct XmlInputSource {
    element: XmlElement,
}

impl XmlInputSource {
    pub fn input_name(&self) -> Option<&str> {
        self.element.attr("name")
    }

    pub fn input_type(&self) -> Option<&str> {
        self.element.attr("type")
    }

    pub fn label(&self) -> Option<&str> {
        self.element.attr("label")
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.attr(name)
    }

    pub fn element(&self) -> &XmlElement {
        &self.element
    }
}

impl From<XmlElement> for XmlInputSource {
    fn from(element: XmlElement) -> Self {
        Self { element }
    }
}
