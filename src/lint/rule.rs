//! Rule definitions.
//!
//! This module provides the core traits and types for defining rules:
//!
//! - [`Rule`] - The trait that all rules must implement
//! - [`RuleId`] - Unique identifier for a rule
//! - [`RuleContext`] - What a rule gets to look at: the extension's base
//!   directory and file discovery within it

use std::path::{Path, PathBuf};

use regex::Regex;

use super::discovery::find_files;
use super::report::RuleReport;
use crate::error::Result;

/// Unique identifier for a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub String);

impl RuleId {
    /// Create a new rule ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input shared by all rules of a run.
#[derive(Debug, Clone)]
pub struct RuleContext {
    base_dir: PathBuf,
}

impl RuleContext {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Root directory of the extension being checked.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// All files below the base directory whose file name matches `pattern`.
    pub fn files(&self, pattern: &Regex) -> Vec<PathBuf> {
        find_files(&self.base_dir, pattern)
    }
}

/// A check over an extension's source tree.
///
/// Each rule inspects the files it cares about and reports what it finds
/// through the [`RuleReport`]. Problems in the analyzed files are reported,
/// never returned as errors.
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule.
    fn id(&self) -> RuleId;

    /// Human-readable title of the rule.
    fn title(&self) -> &str;

    /// Description of what this rule checks.
    fn description(&self) -> &str;

    /// Run the rule.
    fn check(&self, ctx: &RuleContext, report: &mut RuleReport<'_>) -> Result<()>;
}
