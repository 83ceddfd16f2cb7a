//! Schema catalog for manifest validation.
//!
//! Each extension type has one schema document, `dtd_<type>.json`:
//!
//! ```json
//! {
//!   "nodes": { "extension": { "name": "!", "admin:files": "?" } },
//!   "attributes": { "extension": ["type", "method"], "field": ["*"] }
//! }
//! ```
//!
//! `nodes` maps a ruleset name to its children. A child key is either a tag
//! name or `prefix:tag`, in which case the child with tag `tag` is validated
//! with ruleset `prefix:tag`. The mode characters are:
//!
//! - `!` - single, required, error if missing
//! - `=` - single, required, warning if missing
//! - `?` - single, optional
//! - `*` - multiple, optional
//!
//! A `*` child key means arbitrary children. An attribute list starting with
//! `*` means arbitrary attributes.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::Value;

use super::ExtensionType;
use crate::error::{JedError, Result};

static BUILTIN_SCHEMAS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/schemas");

/// Cardinality of a declared child element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `!` - exactly one, error if missing.
    Required,
    /// `=` - exactly one, warning if missing.
    Recommended,
    /// `?` - at most one.
    Optional,
    /// `*` - any number.
    Multiple,
}

impl Mode {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "!" => Some(Self::Required),
            "=" => Some(Self::Recommended),
            "?" => Some(Self::Optional),
            "*" => Some(Self::Multiple),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Required => '!',
            Self::Recommended => '=',
            Self::Optional => '?',
            Self::Multiple => '*',
        }
    }
}

/// One declared child of a ruleset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildRule {
    /// Ruleset used to validate the child (may carry an alias prefix).
    pub ruleset: String,
    /// Tag name the rule applies to.
    pub tag: String,
    pub mode: Mode,
}

impl ChildRule {
    fn new(ruleset: &str, mode: Mode) -> Self {
        let tag = match ruleset.split_once(':') {
            Some((_, tag)) => tag,
            None => ruleset,
        };
        Self {
            ruleset: ruleset.to_string(),
            tag: tag.to_string(),
            mode,
        }
    }
}

/// Children allowed under a ruleset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildRules {
    /// Anything goes; structural checks are skipped.
    Arbitrary,
    /// Declared children, in declaration order.
    Declared(Vec<ChildRule>),
}

impl ChildRules {
    /// Rule for a child tag.
    pub fn for_tag(&self, tag: &str) -> Option<&ChildRule> {
        match self {
            Self::Arbitrary => None,
            Self::Declared(rules) => rules.iter().find(|r| r.tag == tag),
        }
    }
}

/// Attributes allowed on a ruleset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeRules {
    Arbitrary,
    Allowed(Vec<String>),
}

impl AttributeRules {
    pub fn allows(&self, name: &str) -> bool {
        match self {
            Self::Arbitrary => true,
            Self::Allowed(names) => names.iter().any(|n| n == name),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaDocument {
    #[serde(default)]
    nodes: serde_json::Map<String, Value>,
    #[serde(default)]
    attributes: serde_json::Map<String, Value>,
}

/// Validation tables for one extension type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    nodes: HashMap<String, ChildRules>,
    attributes: HashMap<String, AttributeRules>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a schema document. `name` is only used in error messages.
    pub fn from_json(name: &str, text: &str) -> Result<Self> {
        let parse_err = |message: String| JedError::SchemaParseError {
            name: name.to_string(),
            message,
        };

        let doc: SchemaDocument =
            serde_json::from_str(text).map_err(|e| parse_err(e.to_string()))?;

        let mut schema = Schema::new();

        for (ruleset, children) in doc.nodes {
            let children = children
                .as_object()
                .ok_or_else(|| parse_err(format!("nodes.{} must be an object", ruleset)))?;

            let mut declared = Vec::with_capacity(children.len());
            for (child, mode) in children {
                let mode = mode.as_str().and_then(Mode::from_symbol).ok_or_else(|| {
                    parse_err(format!(
                        "nodes.{}.{}: mode must be one of ! = ? *",
                        ruleset, child
                    ))
                })?;
                declared.push((child.as_str(), mode));
            }
            schema
                .declare_children(&ruleset, &declared)
                .map_err(parse_err)?;
        }

        for (ruleset, names) in doc.attributes {
            let names = names
                .as_array()
                .ok_or_else(|| parse_err(format!("attributes.{} must be an array", ruleset)))?
                .iter()
                .map(|v| {
                    v.as_str().map(str::to_string).ok_or_else(|| {
                        parse_err(format!("attributes.{} must contain strings", ruleset))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            schema = schema.with_attributes(&ruleset, &names);
        }

        Ok(schema)
    }

    /// Declare the children of a ruleset. An empty list declares nothing.
    pub fn with_children(mut self, ruleset: &str, children: &[(&str, Mode)]) -> Result<Self> {
        self.declare_children(ruleset, children)
            .map_err(|message| JedError::SchemaParseError {
                name: ruleset.to_string(),
                message,
            })?;
        Ok(self)
    }

    fn declare_children(
        &mut self,
        ruleset: &str,
        children: &[(&str, Mode)],
    ) -> std::result::Result<(), String> {
        if children.is_empty() {
            return Ok(());
        }
        if children.iter().any(|(child, _)| *child == "*") {
            self.nodes.insert(ruleset.to_string(), ChildRules::Arbitrary);
            return Ok(());
        }

        let mut rules: Vec<ChildRule> = Vec::with_capacity(children.len());
        for (child, mode) in children {
            let rule = ChildRule::new(child, *mode);
            if let Some(existing) = rules.iter().find(|r| r.tag == rule.tag) {
                return Err(format!(
                    "'{}' declares tag <{}> twice ('{}' and '{}')",
                    ruleset, rule.tag, existing.ruleset, rule.ruleset
                ));
            }
            rules.push(rule);
        }
        self.nodes
            .insert(ruleset.to_string(), ChildRules::Declared(rules));
        Ok(())
    }

    /// Declare the attributes of a ruleset. An empty list declares nothing.
    pub fn with_attributes(mut self, ruleset: &str, names: &[&str]) -> Self {
        match names.first() {
            None => {}
            Some(&"*") => {
                self.attributes
                    .insert(ruleset.to_string(), AttributeRules::Arbitrary);
            }
            Some(_) => {
                self.attributes.insert(
                    ruleset.to_string(),
                    AttributeRules::Allowed(names.iter().map(|n| n.to_string()).collect()),
                );
            }
        }
        self
    }

    pub fn children(&self, ruleset: &str) -> Option<&ChildRules> {
        self.nodes.get(ruleset)
    }

    pub fn attributes(&self, ruleset: &str) -> Option<&AttributeRules> {
        self.attributes.get(ruleset)
    }
}

/// Schemas for every supported extension type, loaded once.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    schemas: HashMap<ExtensionType, Schema>,
}

impl SchemaCatalog {
    /// A catalog with no schemas.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        let mut catalog = Self::empty();
        for ty in ExtensionType::ALL {
            let name = schema_file_name(ty);
            let Some(file) = BUILTIN_SCHEMAS.get_file(&name) else {
                continue;
            };
            let text = file.contents_utf8().ok_or_else(|| JedError::SchemaParseError {
                name: name.clone(),
                message: "not valid UTF-8".to_string(),
            })?;
            catalog.insert(ty, Schema::from_json(&name, text)?);
        }
        tracing::debug!("Loaded {} built-in schemas", catalog.len());
        Ok(catalog)
    }

    /// Load `dtd_<type>.json` documents from a directory. Types without a
    /// document are simply absent from the catalog.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(JedError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }

        let mut catalog = Self::empty();
        for ty in ExtensionType::ALL {
            let name = schema_file_name(ty);
            let path = dir.join(&name);
            if !path.is_file() {
                tracing::debug!("No schema document {}", path.display());
                continue;
            }
            let text = fs::read_to_string(&path)?;
            catalog.insert(ty, Schema::from_json(&name, &text)?);
        }
        tracing::debug!("Loaded {} schemas from {}", catalog.len(), dir.display());
        Ok(catalog)
    }

    pub fn insert(&mut self, ty: ExtensionType, schema: Schema) {
        self.schemas.insert(ty, schema);
    }

    pub fn schema(&self, ty: ExtensionType) -> Option<&Schema> {
        self.schemas.get(&ty)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

fn schema_file_name(ty: ExtensionType) -> String {
    format!("dtd_{}.json", ty)
}
