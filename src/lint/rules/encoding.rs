//! Obfuscation functions in PHP code.

use std::fs;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::EncodingSettings;
use crate::error::Result;
use crate::language::read_lines;
use crate::lint::{Rule, RuleContext, RuleId, RuleReport};

static PHP_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.php$").expect("PHP_FILE must compile"));

/// Flags PHP lines that mention an encoding function such as `base64`.
#[derive(Debug, Clone)]
pub struct EncodingRule {
    /// Lowercased needles.
    encodings: Vec<String>,
}

impl Default for EncodingRule {
    fn default() -> Self {
        Self::from_settings(&EncodingSettings::default())
    }
}

impl EncodingRule {
    pub fn new(encodings: Vec<String>) -> Self {
        Self {
            encodings: encodings.into_iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    pub fn from_settings(settings: &EncodingSettings) -> Self {
        Self::new(settings.list())
    }

    /// The first configured encoding mentioned on `line`, if any.
    pub fn match_line(&self, line: &str) -> Option<&str> {
        let lower = line.to_lowercase();
        self.encodings
            .iter()
            .find(|e| lower.contains(e.as_str()))
            .map(String::as_str)
    }
}

impl Rule for EncodingRule {
    fn id(&self) -> RuleId {
        RuleId::new("ENCODING")
    }

    fn title(&self) -> &str {
        "Encoded code"
    }

    fn description(&self) -> &str {
        "Looks for encoding functions in PHP files, which often hide obfuscated code"
    }

    fn check(&self, ctx: &RuleContext, report: &mut RuleReport<'_>) -> Result<()> {
        if self.encodings.is_empty() {
            return Ok(());
        }

        for path in ctx.files(&PHP_FILE) {
            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::debug!("Cannot read {}: {}", path.display(), e);
                    continue;
                }
            };

            for (i, line) in read_lines(&bytes).iter().enumerate() {
                if let Some(encoding) = self.match_line(line) {
                    report.add_error(
                        &path,
                        format!("Found '{}', encoded code is not allowed", encoding),
                        Some(i + 1),
                        Some(line.trim_end_matches('\r')),
                    );
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::{Report, Severity};
    use tempfile::TempDir;

    #[test]
    fn matches_case_insensitively() {
        let rule = EncodingRule::new(vec!["Base64".to_string(), "str_rot13".to_string()]);
        assert_eq!(rule.match_line("$x = BASE64_DECODE($y);"), Some("base64"));
        assert_eq!(rule.match_line("str_rot13($s)"), Some("str_rot13"));
        assert_eq!(rule.match_line("echo 'hello';"), None);
    }

    #[test]
    fn one_error_per_line_with_line_number() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/notes.txt"), "base64\n").unwrap();
        fs::write(
            temp.path().join("src/helper.php"),
            "<?php\r\n$a = 1;\r\n$b = base64_decode(str_rot13($c));\r\n",
        )
        .unwrap();

        let rule = EncodingRule::new(vec!["base64".to_string(), "str_rot13".to_string()]);
        let mut report = Report::new();
        rule.check(&RuleContext::new(temp.path()), &mut report.for_rule(rule.id()))
            .unwrap();

        assert_eq!(report.len(), 1);
        let diagnostic = &report.diagnostics()[0];
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.line, Some(3));
        assert_eq!(
            diagnostic.context.as_deref(),
            Some("$b = base64_decode(str_rot13($c));")
        );
    }

    #[test]
    fn default_looks_for_base64() {
        let rule = EncodingRule::default();
        assert!(rule.match_line("base64_encode()").is_some());
    }
}
