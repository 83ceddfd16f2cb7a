//! Extra checks for particular manifest elements.
//!
//! Hooks run after the structural checks of a node and can only add findings.

use super::node::ParsedNode;
use crate::lint::Finding;

/// An extra check run on every validated element with a given tag.
pub type NodeHook = fn(&ParsedNode) -> Vec<Finding>;

/// Hook registered for a tag name, if any.
pub fn hook_for(tag: &str) -> Option<NodeHook> {
    match tag {
        "menu" => Some(check_menu),
        _ => None,
    }
}

/// Menu attributes that the installer ignores once `link` is given.
const LINK_OVERRIDDEN_ATTRIBUTES: [&str; 6] = ["act", "controller", "layout", "sub", "task", "view"];

fn check_menu(node: &ParsedNode) -> Vec<Finding> {
    if !node.has_attr("link") {
        return Vec::new();
    }

    node.attributes()
        .filter(|(name, _)| LINK_OVERRIDDEN_ATTRIBUTES.contains(name))
        .map(|(name, _)| {
            Finding::warning(format!(
                "Menu attribute '{}' has no effect when 'link' is set",
                name
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::Severity;

    #[test]
    fn menu_hook_is_registered() {
        assert!(hook_for("menu").is_some());
        assert!(hook_for("submenu").is_none());
        assert!(hook_for("files").is_none());
    }

    #[test]
    fn menu_with_link_flags_overridden_attributes() {
        let node = ParsedNode::new("menu")
            .with_attr("link", "option=com_foo")
            .with_attr("view", "items")
            .with_attr("img", "class:foo")
            .with_attr("task", "edit");

        let findings = check_menu(&node);

        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.severity == Severity::Warning));
        assert!(findings[0].message.contains("'view'"));
        assert!(findings[1].message.contains("'task'"));
    }

    #[test]
    fn menu_without_link_is_fine() {
        let node = ParsedNode::new("menu")
            .with_attr("view", "items")
            .with_attr("layout", "default");

        assert!(check_menu(&node).is_empty());
    }
}
