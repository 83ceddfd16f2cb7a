//! Diagnostic messages.
//!
//! A [`Finding`] is what a rule engine produces: a category, a message and an
//! optional source line. The [`Report`](super::Report) attaches the file and
//! the producing rule, turning it into a [`Diagnostic`].

use std::cmp::Ordering;
use std::path::PathBuf;

use super::rule::RuleId;

/// Category of a diagnostic.
///
/// `Info < Warning < Error` is a strict severity order. `Compat` is a
/// separate channel for compatibility notes and is not comparable with the
/// other three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Informational, does not affect acceptance.
    Info,
    /// Should be addressed.
    Warning,
    /// Blocks acceptance.
    Error,
    /// Usage that works today but is deprecated.
    Compat,
}

impl Severity {
    fn rank(self) -> Option<u8> {
        match self {
            Severity::Info => Some(0),
            Severity::Warning => Some(1),
            Severity::Error => Some(2),
            Severity::Compat => None,
        }
    }

    /// Short lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Compat => "compat",
        }
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single issue found by a rule engine, not yet attributed to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
    /// 1-based line number.
    pub line: Option<usize>,
    /// Raw text of the offending line (possibly several joined lines).
    pub context: Option<String>,
}

impl Finding {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            line: None,
            context: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn compat(message: impl Into<String>) -> Self {
        Self::new(Severity::Compat, message)
    }

    /// Attach a line number and the raw line text.
    pub fn at(mut self, line: usize, context: impl Into<String>) -> Self {
        self.line = Some(line);
        self.context = Some(context.into());
        self
    }
}

/// A diagnostic produced by a rule for a specific file.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The rule that produced this diagnostic.
    pub rule_id: RuleId,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// File the diagnostic is attributed to.
    pub file: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Optional 1-based line number.
    pub line: Option<usize>,
    /// Optional raw line text.
    pub context: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic without location.
    pub fn new(
        rule_id: RuleId,
        severity: Severity,
        file: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id,
            severity,
            file: file.into(),
            message: message.into(),
            line: None,
            context: None,
        }
    }

    /// Build a diagnostic from an engine finding.
    pub fn from_finding(rule_id: RuleId, file: impl Into<PathBuf>, finding: Finding) -> Self {
        Self {
            rule_id,
            severity: finding.severity,
            file: file.into(),
            message: finding.message,
            line: finding.line,
            context: finding.context,
        }
    }

    /// Add a line number.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Add the raw text of the line.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Info < Severity::Error);
    }

    #[test]
    fn compat_is_not_ranked() {
        assert_eq!(Severity::Compat.partial_cmp(&Severity::Error), None);
        assert_eq!(Severity::Info.partial_cmp(&Severity::Compat), None);
        assert_eq!(
            Severity::Compat.partial_cmp(&Severity::Compat),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn severity_display() {
        assert_eq!(Severity::Info.to_string(), "info");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Compat.to_string(), "compat");
    }

    #[test]
    fn finding_at_sets_location() {
        let finding = Finding::warning("Key is not uppercase").at(3, "foo=\"x\"");
        assert_eq!(finding.line, Some(3));
        assert_eq!(finding.context.as_deref(), Some("foo=\"x\""));
    }

    #[test]
    fn diagnostic_from_finding_keeps_fields() {
        let finding = Finding::error("Wrong line format").at(7, "JUNK");
        let diag = Diagnostic::from_finding(RuleId::new("LANG"), "en-GB.com_foo.ini", finding);

        assert_eq!(diag.rule_id, RuleId::new("LANG"));
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.file, PathBuf::from("en-GB.com_foo.ini"));
        assert_eq!(diag.line, Some(7));
        assert_eq!(diag.context.as_deref(), Some("JUNK"));
    }

    #[test]
    fn diagnostic_builder_pattern() {
        let diag = Diagnostic::new(RuleId::new("ENCODING"), Severity::Error, "a.php", "msg")
            .with_line(10)
            .with_context("base64_decode($x);");

        assert_eq!(diag.line, Some(10));
        assert!(diag.context.is_some());
    }
}
