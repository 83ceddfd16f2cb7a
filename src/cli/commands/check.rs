//! Check command implementation.
//!
//! The `jedcheck check` command runs the selected rules over an extension
//! source tree and prints what they found.

use std::path::{Path, PathBuf};

use crate::cli::args::CheckArgs;
use crate::config::{load_config, JedConfig};
use crate::error::{JedError, Result};
use crate::lint::{
    run, Diagnostic, DiagnosticFormatter, HumanFormatter, JsonFormatter, OutputFormat, Report,
    RuleContext, RuleRegistry, SarifFormatter, Severity,
};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Exit code for problems with the host rather than the extension.
const HOST_FAILURE: i32 = 2;

/// The check command implementation.
pub struct CheckCommand {
    args: CheckArgs,
    config_path: Option<PathBuf>,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(args: CheckArgs, config_path: Option<PathBuf>) -> Self {
        Self { args, config_path }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    fn base_dir(&self) -> &Path {
        &self.args.path
    }

    /// Rule ids to skip: config first, then `--disable`.
    fn disabled_rules(&self, config: &JedConfig) -> Vec<String> {
        config
            .disabled_rules
            .iter()
            .chain(self.args.disable.iter())
            .cloned()
            .collect()
    }

    /// Load config, build the registry and run the selected rules.
    fn run_rules(&self) -> Result<Report> {
        let base_dir = self.base_dir();
        if !base_dir.is_dir() {
            return Err(JedError::NotADirectory {
                path: base_dir.to_path_buf(),
            });
        }

        let config = load_config(base_dir, self.config_path.as_deref())?;
        let registry = RuleRegistry::with_builtins(&config)?;
        let rules = registry.select(&self.args.rules, &self.disabled_rules(&config))?;

        tracing::debug!(
            "Checking {} with {} of {} rules",
            base_dir.display(),
            rules.len(),
            registry.len()
        );
        run(&rules, &RuleContext::new(base_dir))
    }

    /// Format diagnostics using the appropriate formatter.
    fn format_output(&self, diagnostics: &[Diagnostic], use_color: bool) -> String {
        let mut output = Vec::new();

        match self.args.format {
            OutputFormat::Json => {
                let formatter = JsonFormatter::new();
                formatter.format(diagnostics, &mut output).ok();
            }
            OutputFormat::Sarif => {
                let formatter = SarifFormatter::new("jedcheck", env!("CARGO_PKG_VERSION"));
                formatter.format(diagnostics, &mut output).ok();
            }
            OutputFormat::Human => {
                let formatter = HumanFormatter::new(use_color);
                formatter.format(diagnostics, &mut output).ok();
            }
        }

        String::from_utf8(output).unwrap_or_default()
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = match self.run_rules() {
            Ok(report) => report,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(HOST_FAILURE));
            }
        };

        let has_errors = report.has(Severity::Error);
        let has_warnings = report.has(Severity::Warning);
        let should_fail = has_errors || (self.args.strict && has_warnings);

        if report.is_empty() && self.args.format == OutputFormat::Human {
            ui.success("No problems found");
        } else {
            let output = self.format_output(report.diagnostics(), ui.colors_enabled());
            ui.output(&output);
        }

        if should_fail {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<extension type="module" client="site" method="upgrade">
    <name>Hello World</name>
    <author>Jane Doe</author>
    <creationDate>2024-05</creationDate>
    <copyright>(C) 2024 Jane Doe</copyright>
    <license>GPL-2.0-or-later</license>
    <authorEmail>jane@example.com</authorEmail>
    <authorUrl>https://example.com</authorUrl>
    <version>1.0.0</version>
    <description>Says hello</description>
    <files>
        <filename module="mod_hello">mod_hello.php</filename>
    </files>
</extension>
"#;

    fn setup_module(ini: Option<&str>) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("mod_hello.xml"), MANIFEST).unwrap();
        fs::write(temp.path().join("mod_hello.php"), "<?php\necho 'hello';\n").unwrap();
        if let Some(ini) = ini {
            let dir = temp.path().join("language/en-GB");
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("en-GB.mod_hello.ini"), ini).unwrap();
        }
        temp
    }

    fn check(temp: &TempDir, args: CheckArgs) -> (CommandResult, MockUI) {
        let args = CheckArgs {
            path: temp.path().to_path_buf(),
            ..args
        };
        let mut ui = MockUI::new();
        let result = CheckCommand::new(args, None).execute(&mut ui).unwrap();
        (result, ui)
    }

    #[test]
    fn clean_module_passes() {
        let temp = setup_module(Some("MOD_HELLO=\"Hello\"\n"));
        let (result, ui) = check(&temp, CheckArgs::default());

        assert!(result.success, "{}", ui.output_text());
        assert!(ui.output_text().contains("info[INFO_XML]: Name: Hello World"));
        assert!(ui.errors().is_empty());
    }

    #[test]
    fn errors_fail_the_check() {
        let temp = setup_module(Some("MOD HELLO=\"Hello\"\n"));
        let (result, ui) = check(&temp, CheckArgs::default());

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        assert!(ui.output_text().contains("error[LANG]"));
    }

    #[test]
    fn warnings_fail_only_when_strict() {
        let temp = setup_module(Some("Mod_Hello=\"Hello\"\n"));

        let (relaxed, _) = check(&temp, CheckArgs::default());
        assert!(relaxed.success);

        let (strict, ui) = check(
            &temp,
            CheckArgs {
                strict: true,
                ..Default::default()
            },
        );
        assert_eq!(strict.exit_code, 1);
        assert!(ui.output_text().contains("warning[LANG]"));
    }

    #[test]
    fn missing_directory_is_a_host_failure() {
        let temp = TempDir::new().unwrap();
        let args = CheckArgs {
            path: temp.path().join("missing"),
            ..Default::default()
        };
        let mut ui = MockUI::new();
        let result = CheckCommand::new(args, None).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 2);
        assert!(ui.errors()[0].contains("Not a directory"));
    }

    #[test]
    fn unknown_rule_is_a_host_failure() {
        let temp = setup_module(None);
        let (result, ui) = check(
            &temp,
            CheckArgs {
                rules: vec!["NOPE".to_string()],
                ..Default::default()
            },
        );

        assert_eq!(result.exit_code, 2);
        assert!(ui.errors()[0].contains("NOPE"));
    }

    #[test]
    fn config_and_flags_disable_rules() {
        let temp = setup_module(Some("MOD HELLO=\"Hello\"\n"));
        fs::write(temp.path().join(".jedcheck.yml"), "disabled_rules: [lang]\n").unwrap();

        let (result, ui) = check(
            &temp,
            CheckArgs {
                disable: vec!["INFO_XML".to_string()],
                ..Default::default()
            },
        );

        assert!(result.success);
        assert_eq!(ui.successes(), ["No problems found"]);
    }

    #[test]
    fn rules_flag_limits_the_run() {
        let temp = setup_module(Some("MOD HELLO=\"Hello\"\n"));
        let (result, ui) = check(
            &temp,
            CheckArgs {
                rules: vec!["ENCODING".to_string()],
                ..Default::default()
            },
        );

        assert!(result.success);
        assert!(ui.output_text().is_empty());
    }

    #[test]
    fn json_format_outputs_even_when_clean() {
        let temp = setup_module(None);
        let (result, ui) = check(
            &temp,
            CheckArgs {
                format: OutputFormat::Json,
                rules: vec!["ENCODING".to_string()],
                ..Default::default()
            },
        );

        assert!(result.success);
        let parsed: serde_json::Value = serde_json::from_str(&ui.output_text()).unwrap();
        assert_eq!(parsed["summary"]["total"], 0);
    }

    #[test]
    fn sarif_format() {
        let temp = setup_module(Some("MOD HELLO=\"Hello\"\n"));
        let (result, ui) = check(
            &temp,
            CheckArgs {
                format: OutputFormat::Sarif,
                ..Default::default()
            },
        );

        assert!(!result.success);
        let parsed: serde_json::Value = serde_json::from_str(&ui.output_text()).unwrap();
        assert_eq!(parsed["runs"][0]["tool"]["driver"]["name"], "jedcheck");
    }
}
