//! Rule registry for managing rules.
//!
//! The [`RuleRegistry`] stores all available rules in registration order
//! and provides methods for registering, retrieving, selecting and running
//! them.

use super::report::Report;
use super::rule::{Rule, RuleContext, RuleId};
use super::rules::{EncodingRule, LanguageRule, ManifestRule, XmlFilesRule, XmlInfoRule};
use crate::config::JedConfig;
use crate::error::{JedError, Result};
use crate::manifest::SchemaCatalog;

/// Registry of all available rules.
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a registry with all built-in rules, configured from `config`.
    ///
    /// Fails when `config.schemas` names a directory that cannot be loaded.
    pub fn with_builtins(config: &JedConfig) -> Result<Self> {
        let catalog = match &config.schemas {
            Some(dir) => SchemaCatalog::from_dir(dir)?,
            None => SchemaCatalog::builtin()?,
        };

        let mut registry = Self::new();
        registry.register(Box::new(ManifestRule::new(catalog)));
        registry.register(Box::new(XmlFilesRule));
        registry.register(Box::new(XmlInfoRule::from_settings(&config.info)));
        registry.register(Box::new(EncodingRule::from_settings(&config.encoding)));
        registry.register(Box::new(LanguageRule));
        Ok(registry)
    }

    /// Register a rule, replacing one with the same id.
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        let id = rule.id();
        match self.rules.iter().position(|r| r.id() == id) {
            Some(i) => self.rules[i] = rule,
            None => self.rules.push(rule),
        }
    }

    /// Get a rule by ID.
    pub fn get(&self, id: &RuleId) -> Option<&dyn Rule> {
        self.rules.iter().find(|r| r.id() == *id).map(|r| r.as_ref())
    }

    /// Iterate over all rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Rules to run: those in `only` (all when empty) minus `disabled`.
    ///
    /// Ids are matched case-insensitively. An id that names no rule is an
    /// error.
    pub fn select(&self, only: &[String], disabled: &[String]) -> Result<Vec<&dyn Rule>> {
        let resolve = |raw: &String| -> Result<RuleId> {
            self.iter()
                .map(|r| r.id())
                .find(|id| id.0.eq_ignore_ascii_case(raw.trim()))
                .ok_or_else(|| JedError::UnknownRule { id: raw.clone() })
        };
        let only = only.iter().map(resolve).collect::<Result<Vec<_>>>()?;
        let disabled = disabled.iter().map(resolve).collect::<Result<Vec<_>>>()?;

        Ok(self
            .iter()
            .filter(|r| only.is_empty() || only.contains(&r.id()))
            .filter(|r| !disabled.contains(&r.id()))
            .collect())
    }

    /// Get the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `rules` in order over the extension in `ctx`.
pub fn run(rules: &[&dyn Rule], ctx: &RuleContext) -> Result<Report> {
    let mut report = Report::new();
    for rule in rules {
        let before = report.len();
        rule.check(ctx, &mut report.for_rule(rule.id()))?;
        tracing::debug!(
            "Rule {} finished with {} diagnostics",
            rule.id(),
            report.len() - before
        );
    }
    Ok(report)
}
