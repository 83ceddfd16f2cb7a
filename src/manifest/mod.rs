//! Extension manifests.
//!
//! - [`node`] - the parsed element tree ([`ParsedNode`])
//! - [`catalog`] - per-type schema tables ([`SchemaCatalog`])
//! - [`validator`] - recursive schema validation ([`ManifestValidator`])
//! - [`hooks`] - extra checks keyed by tag name
//!
//! # Example
//!
//! ```
//! use jedcheck::manifest::{ManifestValidator, Mode, ParsedNode, Schema};
//!
//! let schema = Schema::new()
//!     .with_children("extension", &[("name", Mode::Required)])
//!     .unwrap()
//!     .with_attributes("extension", &["type"]);
//!
//! let root = ParsedNode::parse(r#"<extension type="module"/>"#).unwrap();
//! let findings = ManifestValidator::new(&schema).validate(&root, "extension");
//!
//! assert_eq!(findings.len(), 1);
//! assert!(findings[0].message.contains("<name>"));
//! ```

pub mod catalog;
pub mod hooks;
pub mod node;
pub mod validator;

pub use catalog::{AttributeRules, ChildRule, ChildRules, Mode, Schema, SchemaCatalog};
pub use node::ParsedNode;
pub use validator::ManifestValidator;

use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Tag of the root element of every extension manifest.
pub const MANIFEST_ROOT: &str = "extension";

/// The fixed set of extension types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionType {
    Component,
    File,
    Language,
    Library,
    Module,
    Package,
    Plugin,
    Template,
}

impl ExtensionType {
    pub const ALL: [ExtensionType; 8] = [
        Self::Component,
        Self::File,
        Self::Language,
        Self::Library,
        Self::Module,
        Self::Package,
        Self::Plugin,
        Self::Template,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::File => "file",
            Self::Language => "language",
            Self::Library => "library",
            Self::Module => "module",
            Self::Package => "package",
            Self::Plugin => "plugin",
            Self::Template => "template",
        }
    }

    /// Types whose root element must carry a `client` attribute.
    pub fn requires_client(self) -> bool {
        matches!(self, Self::Module | Self::Template)
    }
}

impl FromStr for ExtensionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| format!("unknown extension type: {}", s))
    }
}

impl std::fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read and parse a file if it is an extension manifest.
///
/// Returns `None` for unreadable files, malformed XML and XML documents whose
/// root is not `<extension>`; none of these are manifests.
pub fn load_manifest(path: &Path) -> Option<ParsedNode> {
    let text = match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::debug!("Cannot read {}: {}", path.display(), e);
            return None;
        }
    };

    let root = match ParsedNode::parse(&text) {
        Ok(root) => root,
        Err(e) => {
            tracing::debug!("Skipping {}: not well-formed XML ({})", path.display(), e);
            return None;
        }
    };

    if root.name() != MANIFEST_ROOT {
        tracing::trace!("Skipping {}: root is <{}>", path.display(), root.name());
        return None;
    }

    Some(root)
}

/// Keep only command-safe characters: letters, digits, `.`, `_` and `-`,
/// with leading dots removed.
pub fn clean_cmd(value: &str) -> String {
    let kept: String = value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    kept.trim_start_matches('.').to_string()
}

/// The element (system) name of an extension.
///
/// Taken from `<element>` when present. Otherwise `<name>`, overridden by
/// the `<files>` child carrying an attribute named after the extension type
/// (`<filename module="mod_foo">`). The result is lowercased and cleaned.
pub fn element_name(root: &ParsedNode) -> String {
    let raw = match root.child("element") {
        Some(element) => element.text().to_string(),
        None => {
            let ty = root.attr("type").unwrap_or_default();
            let from_files = root.child("files").and_then(|files| {
                files
                    .children()
                    .iter()
                    .rev()
                    .find_map(|child| child.attr(ty))
            });
            match from_files {
                Some(value) if !ty.is_empty() => value.to_string(),
                _ => root.child("name").map(|n| n.text().to_string()).unwrap_or_default(),
            }
        }
    };

    clean_cmd(&raw).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn extension_type_round_trips_through_str() {
        for ty in ExtensionType::ALL {
            assert_eq!(ty.as_str().parse::<ExtensionType>().unwrap(), ty);
        }
        assert!("widget".parse::<ExtensionType>().is_err());
        assert!("Module".parse::<ExtensionType>().is_err());
    }

    #[test]
    fn only_modules_and_templates_require_client() {
        assert!(ExtensionType::Module.requires_client());
        assert!(ExtensionType::Template.requires_client());
        assert!(!ExtensionType::Component.requires_client());
        assert!(!ExtensionType::Plugin.requires_client());
    }

    #[test]
    fn clean_cmd_strips_unsafe_characters() {
        assert_eq!(clean_cmd("mod_Hello World!"), "mod_HelloWorld");
        assert_eq!(clean_cmd("..hidden.name"), "hidden.name");
        assert_eq!(clean_cmd("plg-sys_foo"), "plg-sys_foo");
    }

    #[test]
    fn element_name_prefers_element_node() {
        let root = ParsedNode::parse(
            r#"<extension type="module"><name>Hello</name><element>mod_hello</element></extension>"#,
        )
        .unwrap();
        assert_eq!(element_name(&root), "mod_hello");
    }

    #[test]
    fn element_name_uses_typed_files_attribute() {
        let root = ParsedNode::parse(
            r#"<extension type="plugin"><name>PLG_SYSTEM_FOO</name>
               <files><filename plugin="foo">foo.php</filename></files></extension>"#,
        )
        .unwrap();
        assert_eq!(element_name(&root), "foo");
    }

    #[test]
    fn element_name_falls_back_to_name() {
        let root = ParsedNode::parse(
            r#"<extension type="component"><name>COM_Example</name></extension>"#,
        )
        .unwrap();
        assert_eq!(element_name(&root), "com_example");
    }

    #[test]
    fn load_manifest_skips_non_manifests() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.xml");
        let broken = temp.path().join("broken.xml");
        let manifest = temp.path().join("mod_foo.xml");
        fs::write(&config, "<config><fields/></config>").unwrap();
        fs::write(&broken, "<extension>").unwrap();
        fs::write(&manifest, r#"<extension type="module"/>"#).unwrap();

        assert!(load_manifest(&config).is_none());
        assert!(load_manifest(&broken).is_none());
        assert!(load_manifest(&temp.path().join("missing.xml")).is_none());
        assert_eq!(
            load_manifest(&manifest).unwrap().attr("type"),
            Some("module")
        );
    }
}
