//! Read-only element tree for manifests.
//!
//! [`ParsedNode`] is built once per file from the XML text and keeps only what
//! the checks need: tag name, attributes in document order, element children
//! and the directly contained text.

use roxmltree::{Document, ParsingOptions};

/// One XML element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<ParsedNode>,
    text: String,
}

impl ParsedNode {
    /// Create an element with no attributes, children or text.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an attribute. A second attribute with the same name replaces the first.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    pub fn with_child(mut self, child: ParsedNode) -> Self {
        self.children.push(child);
        self
    }

    /// Parse an XML document into its root element.
    pub fn parse(xml: &str) -> Result<Self, roxmltree::Error> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(xml, options)?;
        Ok(Self::from_xml(doc.root_element()))
    }

    fn from_xml(node: roxmltree::Node<'_, '_>) -> Self {
        let mut parsed = Self::new(node.tag_name().name());
        for attr in node.attributes() {
            parsed = parsed.with_attr(attr.name(), attr.value());
        }
        for child in node.children() {
            if child.is_element() {
                parsed.children.push(Self::from_xml(child));
            } else if child.is_text() {
                if let Some(text) = child.text() {
                    parsed.text.push_str(text);
                }
            }
        }
        parsed
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn children(&self) -> &[ParsedNode] {
        &self.children
    }

    /// Children with the given tag, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ParsedNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First child with the given tag.
    pub fn child(&self, name: &str) -> Option<&ParsedNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Follow a chain of first-children, e.g. `["install", "sql"]`.
    pub fn descend(&self, path: &[&str]) -> Option<&ParsedNode> {
        path.iter().try_fold(self, |node, name| node.child(name))
    }

    /// Text directly inside this element (not trimmed).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True for `<tag/>` and `<tag></tag>`.
    pub fn is_empty_element(&self) -> bool {
        self.children.is_empty() && self.attributes.is_empty() && self.text.is_empty()
    }

    /// Every element of this subtree, this one first.
    pub fn descendants(&self) -> Vec<&ParsedNode> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.descendants());
        }
        out
    }
}
