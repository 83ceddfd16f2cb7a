//! JSON output formatter.
//!
//! Formats diagnostics as machine-readable JSON for tooling integration.

use super::DiagnosticFormatter;
use crate::lint::{Diagnostic, Severity};
use serde::Serialize;
use std::io::Write;

/// Formats output as JSON.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    diagnostics: Vec<JsonDiagnostic<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    rule_id: &'a str,
    severity: &'static str,
    message: &'a str,
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    errors: usize,
    warnings: usize,
    infos: usize,
    compat: usize,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticFormatter for JsonFormatter {
    fn format<W: Write>(
        &self,
        diagnostics: &[Diagnostic],
        writer: &mut W,
    ) -> std::io::Result<()> {
        let json_diagnostics: Vec<_> = diagnostics
            .iter()
            .map(|d| JsonDiagnostic {
                rule_id: &d.rule_id.0,
                severity: d.severity.as_str(),
                message: &d.message,
                file: d.file.display().to_string(),
                line: d.line,
                context: d.context.as_deref(),
            })
            .collect();

        let count = |severity: Severity| diagnostics.iter().filter(|d| d.severity == severity).count();
        let summary = JsonSummary {
            total: diagnostics.len(),
            errors: count(Severity::Error),
            warnings: count(Severity::Warning),
            infos: count(Severity::Info),
            compat: count(Severity::Compat),
        };

        let output = JsonOutput {
            diagnostics: json_diagnostics,
            summary,
        };

        serde_json::to_writer_pretty(&mut *writer, &output).map_err(std::io::Error::other)?;
        writeln!(writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::RuleId;

    fn render(diagnostics: &[Diagnostic]) -> serde_json::Value {
        let mut output = Vec::new();
        JsonFormatter::new().format(diagnostics, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn produces_valid_json() {
        let parsed = render(&[Diagnostic::new(
            RuleId::new("MANIFEST"),
            Severity::Error,
            "mod_foo.xml",
            "Error message",
        )]);

        assert!(parsed["diagnostics"].is_array());
        assert_eq!(parsed["summary"]["total"].as_u64().unwrap(), 1);
        assert_eq!(parsed["diagnostics"][0]["rule_id"], "MANIFEST");
        assert_eq!(parsed["diagnostics"][0]["file"], "mod_foo.xml");
    }

    #[test]
    fn includes_line_and_context_when_present() {
        let parsed = render(&[Diagnostic::new(
            RuleId::new("LANG"),
            Severity::Warning,
            "en-GB.x.ini",
            "msg",
        )
        .with_line(10)
        .with_context("foo=\"x\"")]);

        assert_eq!(parsed["diagnostics"][0]["line"], 10);
        assert_eq!(parsed["diagnostics"][0]["context"], "foo=\"x\"");
    }

    #[test]
    fn omits_missing_location_fields() {
        let parsed = render(&[Diagnostic::new(
            RuleId::new("INFO_XML"),
            Severity::Info,
            ".",
            "msg",
        )]);

        assert!(parsed["diagnostics"][0].get("line").is_none());
        assert!(parsed["diagnostics"][0].get("context").is_none());
    }

    #[test]
    fn summary_counts_every_category() {
        let parsed = render(&[
            Diagnostic::new(RuleId::new("R"), Severity::Error, "f", "e"),
            Diagnostic::new(RuleId::new("R"), Severity::Warning, "f", "w"),
            Diagnostic::new(RuleId::new("R"), Severity::Info, "f", "i"),
            Diagnostic::new(RuleId::new("R"), Severity::Compat, "f", "c"),
            Diagnostic::new(RuleId::new("R"), Severity::Compat, "f", "c2"),
        ]);

        let summary = &parsed["summary"];
        assert_eq!(summary["errors"], 1);
        assert_eq!(summary["warnings"], 1);
        assert_eq!(summary["infos"], 1);
        assert_eq!(summary["compat"], 2);
        assert_eq!(parsed["diagnostics"][3]["severity"], "compat");
    }
}
