//! Diagnostic sink.
//!
//! [`Report`] collects diagnostics from every rule of a run. Rules never see
//! the report directly; they get a [`RuleReport`] scoped to their own id, with
//! one method per channel (error, warning, info, compat).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::diagnostic::{Diagnostic, Finding, Severity};
use super::rule::RuleId;

/// Collected diagnostics for one run.
#[derive(Debug, Default)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the report for a single rule.
    pub fn for_rule(&mut self, rule_id: RuleId) -> RuleReport<'_> {
        RuleReport {
            report: self,
            rule_id,
        }
    }

    /// Append an already attributed diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// All diagnostics in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the report.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Number of diagnostics in a category.
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Whether any diagnostic of this category was reported.
    pub fn has(&self, severity: Severity) -> bool {
        self.diagnostics.iter().any(|d| d.severity == severity)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics grouped by file, files in path order.
    pub fn by_file(&self) -> BTreeMap<&Path, Vec<&Diagnostic>> {
        let mut grouped: BTreeMap<&Path, Vec<&Diagnostic>> = BTreeMap::new();
        for diag in &self.diagnostics {
            grouped.entry(diag.file.as_path()).or_default().push(diag);
        }
        grouped
    }
}

/// A [`Report`] view that stamps every diagnostic with one rule id.
pub struct RuleReport<'a> {
    report: &'a mut Report,
    rule_id: RuleId,
}

impl RuleReport<'_> {
    /// The rule this view reports for.
    pub fn rule_id(&self) -> &RuleId {
        &self.rule_id
    }

    pub fn add_error(
        &mut self,
        file: &Path,
        message: impl Into<String>,
        line: Option<usize>,
        raw: Option<&str>,
    ) {
        self.add(Severity::Error, file, message, line, raw);
    }

    pub fn add_warning(
        &mut self,
        file: &Path,
        message: impl Into<String>,
        line: Option<usize>,
        raw: Option<&str>,
    ) {
        self.add(Severity::Warning, file, message, line, raw);
    }

    pub fn add_info(
        &mut self,
        file: &Path,
        message: impl Into<String>,
        line: Option<usize>,
        raw: Option<&str>,
    ) {
        self.add(Severity::Info, file, message, line, raw);
    }

    pub fn add_compat(
        &mut self,
        file: &Path,
        message: impl Into<String>,
        line: Option<usize>,
        raw: Option<&str>,
    ) {
        self.add(Severity::Compat, file, message, line, raw);
    }

    /// Attribute engine findings to a file, keeping their order.
    pub fn add_findings(&mut self, file: &Path, findings: impl IntoIterator<Item = Finding>) {
        for finding in findings {
            self.report.push(Diagnostic::from_finding(
                self.rule_id.clone(),
                PathBuf::from(file),
                finding,
            ));
        }
    }

    fn add(
        &mut self,
        severity: Severity,
        file: &Path,
        message: impl Into<String>,
        line: Option<usize>,
        raw: Option<&str>,
    ) {
        let mut diag = Diagnostic::new(self.rule_id.clone(), severity, file, message);
        diag.line = line;
        diag.context = raw.map(str::to_string);
        self.report.push(diag);
    }
}
