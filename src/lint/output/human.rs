//! Human-readable output formatter.
//!
//! Formats diagnostics for terminal display with optional color support.

use super::DiagnosticFormatter;
use crate::lint::{Diagnostic, Severity};
use console::Style;
use std::io::Write;

/// Formats output for human consumption.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn severity_style(severity: Severity) -> Style {
        match severity {
            Severity::Error => Style::new().red().bold(),
            Severity::Warning => Style::new().yellow().bold(),
            Severity::Info => Style::new().cyan(),
            Severity::Compat => Style::new().magenta(),
        }
    }

    fn prefix(&self, severity: Severity) -> String {
        let style = Self::severity_style(severity).force_styling(self.use_color);
        style.apply_to(severity.as_str()).to_string()
    }
}

impl DiagnosticFormatter for HumanFormatter {
    fn format<W: Write>(
        &self,
        diagnostics: &[Diagnostic],
        writer: &mut W,
    ) -> std::io::Result<()> {
        for diag in diagnostics {
            // Header line: error[RULE]: message
            writeln!(
                writer,
                "{}[{}]: {}",
                self.prefix(diag.severity),
                diag.rule_id.0,
                diag.message
            )?;

            match diag.line {
                Some(line) => writeln!(writer, "  --> {}:{}", diag.file.display(), line)?,
                None => writeln!(writer, "  --> {}", diag.file.display())?,
            }

            if let Some(ref context) = diag.context {
                for (i, raw) in context.lines().enumerate() {
                    let label = if i == 0 { "line" } else { "    " };
                    writeln!(writer, "   = {}: {}", label, raw)?;
                }
            }

            writeln!(writer)?;
        }

        let count = |severity: Severity| diagnostics.iter().filter(|d| d.severity == severity).count();
        let (errors, warnings) = (count(Severity::Error), count(Severity::Warning));
        let (infos, compat) = (count(Severity::Info), count(Severity::Compat));

        if !diagnostics.is_empty() {
            writeln!(
                writer,
                "Found {} error(s), {} warning(s), {} info and {} compat note(s)",
                errors, warnings, infos, compat
            )?;
        }

        Ok(())
    }
}
