//! Extension name, version and listing conventions.
//!
//! The display name is resolved through the extension's `.sys.ini` file the
//! same way the installer shows it, then checked against the naming rules
//! of the extensions directory.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::InfoSettings;
use crate::error::Result;
use crate::language::Translations;
use crate::lint::{Finding, Rule, RuleContext, RuleId, RuleReport};
use crate::manifest::{element_name, ParsedNode};

use super::manifests;

static MODULE_OR_PLUGIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:module|plugin)\b").expect("MODULE_OR_PLUGIN must compile")
});

static VERSION_IN_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\bversion\b|\d\.\d)").expect("VERSION_IN_NAME must compile")
});

/// Plugin name prefixes that differ from the group folder.
const PLUGIN_GROUP_ALIASES: [(&str, &str); 4] = [
    ("button", "editors-xtd"),
    ("editor", "editors"),
    ("smartsearch", "finder"),
    ("twofactorauthentication", "twofactorauth"),
];

/// Reports manifest metadata and checks listing names.
#[derive(Debug, Clone)]
pub struct XmlInfoRule {
    language_tag: String,
    approved_domains: Vec<String>,
}

impl Default for XmlInfoRule {
    fn default() -> Self {
        Self::from_settings(&InfoSettings::default())
    }
}

impl XmlInfoRule {
    pub fn new(language_tag: impl Into<String>, approved_domains: Vec<String>) -> Self {
        Self {
            language_tag: language_tag.into(),
            approved_domains,
        }
    }

    pub fn from_settings(settings: &InfoSettings) -> Self {
        Self::new(settings.language_tag.clone(), settings.approved_domains.clone())
    }

    /// Findings for one manifest; `manifest_dir` is the directory holding it.
    pub fn check_manifest(&self, manifest_dir: &Path, root: &ParsedNode) -> Vec<Finding> {
        let mut findings = Vec::new();
        let ty = root.attr("type").unwrap_or_default();

        let extension = extension_id(root);
        let translations = self.load_translations(manifest_dir, root, &extension);

        let raw_name = root.child("name").map(ParsedNode::text).unwrap_or_default();
        let name = translations.translate(raw_name);
        let text_of = |tag: &str| root.child(tag).map(ParsedNode::text).unwrap_or_default();

        findings.push(Finding::info(format!(
            "Name: {} | Version: {} | Creation date: {}",
            name,
            text_of("version"),
            text_of("creationDate")
        )));

        if MODULE_OR_PLUGIN.is_match(&name) {
            findings.push(Finding::error(format!(
                "Extension name '{}' contains the word 'module' or 'plugin'",
                name
            )));
        }
        let lower = name.to_lowercase();
        if lower.contains("template") {
            findings.push(Finding::warning(format!(
                "Extension name '{}' contains the reserved word 'template'",
                name
            )));
        }
        if VERSION_IN_NAME.is_match(&name) {
            findings.push(Finding::error(format!(
                "Extension name '{}' contains a version",
                name
            )));
        }
        if lower.starts_with("joomla") {
            findings.push(Finding::error(format!(
                "Extension name '{}' starts with 'Joomla'",
                name
            )));
        } else if lower.contains("joom") {
            findings.push(Finding::warning(format!(
                "Extension name '{}' contains 'Joom', a derivative of the Joomla trademark",
                name
            )));
        }

        let url = text_of("authorUrl");
        if let Some(domain) = self.unapproved_domain(url) {
            findings.push(Finding::error(format!(
                "Author URL '{}' has 'joom' in its domain '{}', which is not an approved domain",
                url, domain
            )));
        }

        if ty == "component" {
            if let Some(menu) = root.descend(&["administration", "menu"]) {
                let label = translations.translate(menu.text().trim());
                if label != name {
                    findings.push(Finding::warning(format!(
                        "Admin menu label '{}' differs from the extension name '{}'",
                        label, name
                    )));
                }
            }
        }

        if ty == "plugin" {
            let group = root.attr("group").unwrap_or_default();
            if !plugin_name_matches_group(&name, group) {
                findings.push(Finding::warning(format!(
                    "Plugin name '{}' should read 'Group - Name' with the group matching '{}'",
                    name, group
                )));
            }
        }

        findings
    }

    /// The host of `url` when it mentions "joom" and is not approved.
    fn unapproved_domain(&self, url: &str) -> Option<String> {
        if !url.to_lowercase().contains("joom") {
            return None;
        }

        let domain = if url.contains("//") {
            let trimmed = url.trim();
            let absolute = if trimmed.starts_with("//") {
                format!("http:{}", trimmed)
            } else {
                trimmed.to_string()
            };
            url::Url::parse(&absolute)
                .ok()
                .and_then(|u| u.host_str().map(str::to_string))
                .unwrap_or_default()
        } else {
            url.to_string()
        };

        if !domain.to_lowercase().contains("joom") {
            return None;
        }
        let domain = domain.strip_prefix("www.").unwrap_or(&domain).to_string();
        let approved = self
            .approved_domains
            .iter()
            .any(|d| d.eq_ignore_ascii_case(&domain));
        (!approved).then_some(domain)
    }

    /// Translations from the first `.sys.ini` found in the lookup folders.
    fn load_translations(&self, manifest_dir: &Path, root: &ParsedNode, extension: &str) -> Translations {
        let mut translations = Translations::new();
        let file_name = format!("{}.{}.sys.ini", self.language_tag, extension);

        for dir in self.lookup_dirs(root) {
            let candidate = manifest_dir.join(&dir).join(&file_name);
            if candidate.is_file() {
                translations.extend_from_file(&candidate);
                break;
            }
        }
        if translations.is_empty() {
            tracing::debug!("No {} found for {}", file_name, extension);
        }
        translations
    }

    /// Folders, relative to the manifest, that may hold the `.sys.ini` file.
    fn lookup_dirs(&self, root: &ParsedNode) -> Vec<PathBuf> {
        let tag = self.language_tag.as_str();
        let mut dirs: Vec<PathBuf> = Vec::new();

        let files_folders = [
            root.descend(&["administration", "files"]),
            root.child("files"),
        ];
        for node in files_folders.into_iter().flatten() {
            if let Some(folder) = node.attr("folder") {
                dirs.push(Path::new(folder.trim_matches('/')).join("language").join(tag));
            }
        }
        dirs.push(Path::new("language").join(tag));

        let language_lists = [
            root.descend(&["administration", "languages"]),
            root.child("languages"),
        ];
        for list in language_lists.into_iter().flatten() {
            let folder = list.attr("folder").unwrap_or_default().trim_matches('/');
            for language in list.children_named("language") {
                if language.attr("tag").map(str::trim) != Some(tag) {
                    continue;
                }
                let parent = Path::new(language.text())
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_default();
                dirs.push(Path::new(folder).join(parent));
            }
        }

        dirs.push(PathBuf::new());

        let mut unique = Vec::with_capacity(dirs.len());
        for dir in dirs {
            if !unique.contains(&dir) {
                unique.push(dir);
            }
        }
        unique
    }
}

/// Identifier used in language file names: `com_foo`, `plg_system_foo`, `mod_foo`.
fn extension_id(root: &ParsedNode) -> String {
    let mut extension = element_name(root);
    match root.attr("type") {
        Some("component") if !extension.starts_with("com_") => {
            extension = format!("com_{}", extension);
        }
        Some("plugin") => {
            if let Some(group) = root.attr("group") {
                extension = format!("plg_{}_{}", group, extension);
            }
        }
        _ => {}
    }
    extension
}

/// Whether a plugin name reads "Group - Name" for its group.
fn plugin_name_matches_group(name: &str, group: &str) -> bool {
    let Some((prefix, _)) = name.split_once(" - ") else {
        return false;
    };
    let prefix: String = prefix
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    prefix == group
        || prefix == group.replace('-', "")
        || PLUGIN_GROUP_ALIASES
            .iter()
            .any(|(alias, target)| *alias == prefix && *target == group)
}

impl Rule for XmlInfoRule {
    fn id(&self) -> RuleId {
        RuleId::new("INFO_XML")
    }

    fn title(&self) -> &str {
        "Manifest information"
    }

    fn description(&self) -> &str {
        "Reports name and version of each manifest and checks listing names"
    }

    fn check(&self, ctx: &RuleContext, report: &mut RuleReport<'_>) -> Result<()> {
        let found = manifests(ctx);
        if found.is_empty() {
            report.add_error(ctx.base_dir(), "No extension manifest found", None, None);
            return Ok(());
        }

        for (path, root) in found {
            let dir = path.parent().unwrap_or(ctx.base_dir());
            report.add_findings(&path, self.check_manifest(dir, &root));
        }
        Ok(())
    }
}
