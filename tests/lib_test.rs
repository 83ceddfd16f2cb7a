//! Library integration tests.

use std::fs;

use jedcheck::config::JedConfig;
use jedcheck::lint::{run, RuleContext, RuleRegistry, Severity};
use jedcheck::JedError;
use tempfile::TempDir;

#[test]
fn error_types_are_public() {
    let err = JedError::UnknownRule { id: "test".into() };
    assert!(err.to_string().contains("test"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> jedcheck::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use jedcheck::cli::{Cli, Commands};

    let cli = Cli::parse_from(["jedcheck", "rules", "--json"]);
    if let Commands::Rules(args) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Rules command");
    }
}

#[test]
fn rules_run_over_a_template() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("templateDetails.xml"),
        r#"<extension type="template" client="site" method="upgrade">
             <name>Joomla Starter Template</name>
             <version>2.0</version>
             <files><filename>index.php</filename></files>
           </extension>"#,
    )
    .unwrap();
    fs::write(temp.path().join("index.php"), "<?php\n").unwrap();

    let registry = RuleRegistry::with_builtins(&JedConfig::default()).unwrap();
    let rules = registry.select(&[], &[]).unwrap();
    let report = run(&rules, &RuleContext::new(temp.path())).unwrap();

    let info_xml: Vec<_> = report
        .diagnostics()
        .iter()
        .filter(|d| d.rule_id.0 == "INFO_XML")
        .map(|d| (d.severity, d.message.as_str()))
        .collect();

    assert!(info_xml
        .iter()
        .any(|(s, m)| *s == Severity::Warning && m.contains("'template'")));
    assert!(info_xml
        .iter()
        .any(|(s, m)| *s == Severity::Error && m.contains("starts with 'Joomla'")));
    assert!(!report
        .diagnostics()
        .iter()
        .any(|d| d.rule_id.0 == "XMLFILES"));
}
