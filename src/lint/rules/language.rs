//! Translation file checks.

use std::fs;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::language::{lint, read_lines};
use crate::lint::{Rule, RuleContext, RuleId, RuleReport};

/// `en-GB.com_foo.ini`, `de-DE.plg_system_foo.sys.ini`, ...
static LANGUAGE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2,3}-[A-Z]{2}\.\w+(?:\.sys)?\.ini$").expect("LANGUAGE_FILE must compile")
});

/// Lints every translation file of the extension.
pub struct LanguageRule;

impl Rule for LanguageRule {
    fn id(&self) -> RuleId {
        RuleId::new("LANG")
    }

    fn title(&self) -> &str {
        "Language files"
    }

    fn description(&self) -> &str {
        "Checks translation files for syntax the ini parser rejects or misreads"
    }

    fn check(&self, ctx: &RuleContext, report: &mut RuleReport<'_>) -> Result<()> {
        for path in ctx.files(&LANGUAGE_FILE) {
            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::debug!("Cannot read {}: {}", path.display(), e);
                    continue;
                }
            };
            let findings = lint(&read_lines(&bytes));
            tracing::trace!("{}: {} findings", path.display(), findings.len());
            report.add_findings(&path, findings);
        }
        Ok(())
    }
}
