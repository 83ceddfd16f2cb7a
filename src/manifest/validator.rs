//! Recursive manifest validation against a [`Schema`].
//!
//! For each node, given its ruleset name:
//!
//! 1. attributes not in the ruleset's allow-list are reported (info)
//! 2. declared children are checked for cardinality, undeclared children and
//!    empty children are reported
//! 3. the tag's [hook](super::hooks) runs, if one is registered
//! 4. children with a declared rule are validated with that rule's ruleset
//!
//! Findings come back grouped: errors, then warnings, then infos, each group
//! in discovery order.

use std::collections::HashSet;

use super::catalog::{ChildRules, Mode, Schema};
use super::hooks::hook_for;
use super::node::ParsedNode;
use crate::lint::{Finding, Severity};

/// Validates manifest trees against one schema.
///
/// The validator holds no per-file state; one instance can check any number
/// of files, in any order.
#[derive(Debug, Clone, Copy)]
pub struct ManifestValidator<'a> {
    schema: &'a Schema,
}

#[derive(Default)]
struct Findings {
    errors: Vec<Finding>,
    warnings: Vec<Finding>,
    infos: Vec<Finding>,
}

impl Findings {
    fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Error => self.errors.push(finding),
            Severity::Warning => self.warnings.push(finding),
            Severity::Info | Severity::Compat => self.infos.push(finding),
        }
    }

    fn into_vec(self) -> Vec<Finding> {
        let mut all = self.errors;
        all.extend(self.warnings);
        all.extend(self.infos);
        all
    }
}

impl<'a> ManifestValidator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Validate `root` and its subtree, starting with ruleset `ruleset`.
    pub fn validate(&self, root: &ParsedNode, ruleset: &str) -> Vec<Finding> {
        let mut findings = Findings::default();
        self.validate_node(root, ruleset, &mut findings);
        findings.into_vec()
    }

    fn validate_node(&self, node: &ParsedNode, ruleset: &str, out: &mut Findings) {
        let name = node.name();

        self.check_attributes(node, ruleset, out);

        let child_rules = self.schema.children(ruleset);
        match child_rules {
            None => {
                if !node.children().is_empty() {
                    out.push(Finding::info(format!(
                        "<{}> has child elements, none are expected",
                        name
                    )));
                }
            }
            Some(ChildRules::Arbitrary) => {}
            Some(rules) => self.check_children(node, rules, out),
        }

        if let Some(hook) = hook_for(name) {
            for finding in hook(node) {
                out.push(finding);
            }
        }

        if let Some(rules) = child_rules {
            for child in node.children() {
                if let Some(rule) = rules.for_tag(child.name()) {
                    self.validate_node(child, &rule.ruleset, out);
                }
            }
        }
    }

    fn check_attributes(&self, node: &ParsedNode, ruleset: &str, out: &mut Findings) {
        let allowed = self.schema.attributes(ruleset);
        for (attr, _) in node.attributes() {
            if allowed.is_some_and(|rules| rules.allows(attr)) {
                continue;
            }
            out.push(Finding::info(format!(
                "Unknown attribute '{}' on <{}>",
                attr,
                node.name()
            )));
        }
    }

    fn check_children(&self, node: &ParsedNode, rules: &ChildRules, out: &mut Findings) {
        let ChildRules::Declared(declared) = rules else {
            return;
        };
        let name = node.name();

        for rule in declared {
            let severity = match rule.mode {
                Mode::Required => Severity::Error,
                Mode::Recommended => Severity::Warning,
                Mode::Optional | Mode::Multiple => continue,
            };
            match node.children_named(&rule.tag).count() {
                0 => out.push(Finding::new(severity, missing_required(name, &rule.tag))),
                1 => {}
                _ => out.push(Finding::new(severity, multiple_found(name, &rule.tag))),
            }
        }

        let mut seen = HashSet::new();
        for child in node.children() {
            let tag = child.name();
            if !seen.insert(tag) {
                continue;
            }
            match rules.for_tag(tag) {
                None => out.push(Finding::info(format!(
                    "Unknown element <{}> inside <{}>",
                    tag, name
                ))),
                Some(rule) if rule.mode == Mode::Optional => {
                    if node.children_named(tag).count() > 1 {
                        out.push(Finding::error(multiple_found(name, tag)));
                    }
                }
                Some(_) => {}
            }
        }

        for child in node.children() {
            if child.is_empty_element() {
                out.push(Finding::info(format!("Empty element <{}>", child.name())));
            }
        }
    }
}

fn missing_required(parent: &str, child: &str) -> String {
    format!("<{}> is missing the required <{}> element", parent, child)
}

fn multiple_found(parent: &str, child: &str) -> String {
    format!(
        "<{}> contains more than one <{}> element, only one is allowed",
        parent, child
    )
}
