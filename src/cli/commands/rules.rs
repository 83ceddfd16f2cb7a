//! Rules command implementation.
//!
//! The `jedcheck rules` command lists every rule with its id, title and
//! description.

use std::path::{Path, PathBuf};

use console::Style;
use serde::Serialize;

use crate::cli::args::RulesArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::lint::RuleRegistry;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The rules command implementation.
pub struct RulesCommand {
    args: RulesArgs,
    config_path: Option<PathBuf>,
}

#[derive(Serialize)]
struct RuleEntry<'a> {
    id: String,
    title: &'a str,
    description: &'a str,
}

impl RulesCommand {
    /// Create a new rules command.
    pub fn new(args: RulesArgs, config_path: Option<PathBuf>) -> Self {
        Self { args, config_path }
    }

    fn render(&self, registry: &RuleRegistry, use_color: bool) -> Result<String> {
        let entries: Vec<_> = registry
            .iter()
            .map(|rule| RuleEntry {
                id: rule.id().0,
                title: rule.title(),
                description: rule.description(),
            })
            .collect();

        if self.args.json {
            let mut json = serde_json::to_string_pretty(&entries).map_err(anyhow::Error::from)?;
            json.push('\n');
            return Ok(json);
        }

        let id_style = Style::new().bold().force_styling(use_color);
        let dim = Style::new().dim().force_styling(use_color);
        let mut out = String::new();
        for entry in &entries {
            out.push_str(&format!(
                "{:<10} {}\n           {}\n",
                id_style.apply_to(&entry.id),
                entry.title,
                dim.apply_to(entry.description)
            ));
        }
        Ok(out)
    }
}

impl Command for RulesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = load_config(Path::new("."), self.config_path.as_deref())
            .and_then(|config| RuleRegistry::with_builtins(&config));
        let registry = match registry {
            Ok(registry) => registry,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(2));
            }
        };

        let output = self.render(&registry, ui.colors_enabled())?;
        ui.output(&output);
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JedConfig;
    use crate::ui::MockUI;

    fn registry() -> RuleRegistry {
        RuleRegistry::with_builtins(&JedConfig::default()).unwrap()
    }

    #[test]
    fn lists_rules_in_order() {
        let cmd = RulesCommand::new(RulesArgs::default(), None);
        let output = cmd.render(&registry(), false).unwrap();

        let ids: Vec<_> = output
            .lines()
            .filter(|l| !l.starts_with(' '))
            .filter_map(|l| l.split_whitespace().next())
            .collect();
        assert_eq!(ids, vec!["MANIFEST", "XMLFILES", "INFO_XML", "ENCODING", "LANG"]);
    }

    #[test]
    fn lists_rules_as_json() {
        let cmd = RulesCommand::new(RulesArgs { json: true }, None);
        let output = cmd.render(&registry(), false).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 5);
        assert_eq!(parsed[4]["id"], "LANG");
        assert!(parsed[4]["title"].is_string());
    }

    #[test]
    fn missing_config_file_is_a_host_failure() {
        let cmd = RulesCommand::new(
            RulesArgs::default(),
            Some(PathBuf::from("/definitely/not/here.yml")),
        );
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 2);
        assert_eq!(ui.errors().len(), 1);
    }
}
