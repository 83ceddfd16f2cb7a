//! Manifest structure validation.
//!
//! Every `<extension>` document is checked against the schema of its
//! extension type after a few prechecks on the root element.

use crate::error::Result;
use crate::lint::{Finding, Rule, RuleContext, RuleId, RuleReport};
use crate::manifest::{ExtensionType, ManifestValidator, ParsedNode, SchemaCatalog, MANIFEST_ROOT};

use super::manifests;

/// Validates extension manifests against the per-type schemas.
pub struct ManifestRule {
    catalog: SchemaCatalog,
}

impl ManifestRule {
    pub fn new(catalog: SchemaCatalog) -> Self {
        Self { catalog }
    }

    /// Rule backed by the embedded schema documents.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(SchemaCatalog::builtin()?))
    }

    /// All findings for one manifest root, prechecks first.
    pub fn check_manifest(&self, root: &ParsedNode) -> Vec<Finding> {
        let mut findings = Vec::new();

        let type_name = root.attr("type").unwrap_or_default();
        let Ok(ty) = type_name.parse::<ExtensionType>() else {
            findings.push(Finding::error(format!(
                "Unknown extension type '{}'",
                type_name
            )));
            return findings;
        };

        let Some(schema) = self.catalog.schema(ty) else {
            findings.push(Finding::error(format!(
                "Extension type '{}' is not accepted, no schema is available",
                ty
            )));
            return findings;
        };

        if root.attr("method") != Some("upgrade") {
            findings.push(Finding::warning(
                "The <extension> element has no method=\"upgrade\" attribute",
            ));
        }

        if ty.requires_client() {
            match root.attr("client") {
                None => findings.push(Finding::error(format!(
                    "The <{}> element is missing the 'client' attribute",
                    root.name()
                ))),
                Some("site" | "administrator") => {}
                Some(other) => findings.push(Finding::error(format!(
                    "Unknown value '{}' of the 'client' attribute on <{}>, expected site or administrator",
                    other,
                    root.name()
                ))),
            }
        }

        findings.extend(ManifestValidator::new(schema).validate(root, MANIFEST_ROOT));
        findings
    }
}

impl Rule for ManifestRule {
    fn id(&self) -> RuleId {
        RuleId::new("MANIFEST")
    }

    fn title(&self) -> &str {
        "Manifest structure"
    }

    fn description(&self) -> &str {
        "Checks extension manifests against the schema of their extension type"
    }

    fn check(&self, ctx: &RuleContext, report: &mut RuleReport<'_>) -> Result<()> {
        for (path, root) in manifests(ctx) {
            tracing::debug!("Validating manifest {}", path.display());
            report.add_findings(&path, self.check_manifest(&root));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::{Report, Severity};
    use crate::manifest::{Mode, Schema};
    use std::fs;
    use tempfile::TempDir;

    fn rule() -> ManifestRule {
        let schema = Schema::new()
            .with_children(
                "extension",
                &[("name", Mode::Required), ("version", Mode::Recommended)],
            )
            .unwrap()
            .with_attributes("extension", &["type", "method", "client"]);
        let mut catalog = SchemaCatalog::empty();
        catalog.insert(ExtensionType::Module, schema.clone());
        catalog.insert(ExtensionType::Component, schema);
        ManifestRule::new(catalog)
    }

    fn check(xml: &str) -> Vec<Finding> {
        rule().check_manifest(&ParsedNode::parse(xml).unwrap())
    }

    #[test]
    fn clean_module_has_no_findings() {
        let findings = check(
            r#"<extension type="module" client="site" method="upgrade">
                 <name>mod_hello</name><version>1.0.0</version>
               </extension>"#,
        );
        assert!(findings.is_empty(), "{:?}", findings);
    }

    #[test]
    fn unknown_type_stops_checking() {
        let findings = check(r#"<extension type="widget"/>"#);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(findings[0].message.contains("'widget'"));
    }

    #[test]
    fn missing_schema_stops_checking() {
        let findings = check(r#"<extension type="plugin"/>"#);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("not accepted"));
    }

    #[test]
    fn missing_upgrade_method_warns() {
        let findings = check(
            r#"<extension type="component"><name>x</name><version>1</version></extension>"#,
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(findings[0].message.contains("method"));
    }

    #[test]
    fn module_client_is_required_and_checked() {
        let missing = check(
            r#"<extension type="module" method="upgrade"><name>x</name><version>1</version></extension>"#,
        );
        assert_eq!(missing.len(), 1);
        assert!(missing[0].message.contains("'client'"));

        let wrong = check(
            r#"<extension type="module" client="api" method="upgrade"><name>x</name><version>1</version></extension>"#,
        );
        assert_eq!(wrong.len(), 1);
        assert!(wrong[0].message.contains("'api'"));
    }

    #[test]
    fn prechecks_come_before_schema_findings() {
        let findings = check(r#"<extension type="module" client="site"><foo/></extension>"#);
        let severities: Vec<_> = findings.iter().map(|f| f.severity).collect();
        assert_eq!(
            severities,
            vec![
                Severity::Warning,
                Severity::Error,
                Severity::Warning,
                Severity::Info,
                Severity::Info
            ]
        );
    }

    #[test]
    fn builtin_rule_accepts_a_typical_module() {
        let rule = ManifestRule::builtin().unwrap();
        let root = ParsedNode::parse(
            r#"<extension type="module" client="site" method="upgrade">
                 <name>MOD_HELLO</name>
                 <author>Jane</author>
                 <creationDate>2024-01</creationDate>
                 <copyright>(C) Jane</copyright>
                 <license>GPL-2.0-or-later</license>
                 <authorEmail>jane@example.com</authorEmail>
                 <authorUrl>https://example.com</authorUrl>
                 <version>1.0.0</version>
                 <description>MOD_HELLO_XML_DESCRIPTION</description>
                 <files>
                   <filename module="mod_hello">mod_hello.php</filename>
                   <folder>tmpl</folder>
                 </files>
                 <config>
                   <fields name="params">
                     <fieldset name="basic">
                       <field name="greeting" type="text" default="Hi"/>
                     </fieldset>
                   </fields>
                 </config>
               </extension>"#,
        )
        .unwrap();

        let findings = rule.check_manifest(&root);
        assert!(findings.is_empty(), "{:?}", findings);
    }

    #[test]
    fn check_reports_per_manifest_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("mod_a.xml"),
            r#"<extension type="widget"/>"#,
        )
        .unwrap();
        fs::write(temp.path().join("config.xml"), "<config/>").unwrap();

        let rule = rule();
        let mut report = Report::new();
        rule.check(&RuleContext::new(temp.path()), &mut report.for_rule(rule.id()))
            .unwrap();

        assert_eq!(report.len(), 1);
        let diagnostic = &report.diagnostics()[0];
        assert_eq!(diagnostic.rule_id, RuleId::new("MANIFEST"));
        assert!(diagnostic.file.ends_with("mod_a.xml"));
    }
}
