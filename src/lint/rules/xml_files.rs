//! Files and folders declared in manifests must exist.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::lint::{Finding, Rule, RuleContext, RuleId, RuleReport};
use crate::manifest::{clean_cmd, ParsedNode};

use super::manifests;

/// Packaged archives may ship unpacked as a directory of the same stem.
static ARCHIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)\.(zip|tgz|tar\.gz)$").expect("ARCHIVE must compile")
});

/// `config` attributes that name folders of the installed extension.
const CONFIG_PATH_ATTRIBUTES: [&str; 3] = ["addfieldpath", "addformpath", "addrulepath"];

/// Checks that every declared file and folder is part of the package.
pub struct XmlFilesRule;

/// `dir` joined with a manifest-relative name.
fn under(dir: &Path, name: &str) -> PathBuf {
    dir.join(name.trim_start_matches('/'))
}

/// Directory a `<files>`-like node is relative to.
fn folder_of(base: &Path, node: &ParsedNode) -> PathBuf {
    match node.attr("folder") {
        Some(folder) => under(base, folder),
        None => base.to_path_buf(),
    }
}

#[derive(Default)]
struct Missing {
    findings: Vec<Finding>,
}

impl Missing {
    fn files<'a>(&mut self, nodes: impl IntoIterator<Item = &'a ParsedNode>, dir: &Path) {
        for node in nodes {
            let path = under(dir, node.text());
            if path.is_file() {
                continue;
            }
            let unpacked = path
                .to_str()
                .and_then(|p| ARCHIVE.captures(p))
                .and_then(|caps| caps.get(1))
                .is_some_and(|stem| Path::new(stem.as_str()).is_dir());
            if unpacked {
                continue;
            }
            self.findings.push(Finding::error(format!(
                "File '{}' is declared in the manifest but missing",
                node.text()
            )));
        }
    }

    fn folders<'a>(&mut self, nodes: impl IntoIterator<Item = &'a ParsedNode>, dir: &Path) {
        for node in nodes {
            self.folder(node.text(), &under(dir, node.text()));
        }
    }

    fn folder(&mut self, declared: &str, path: &Path) {
        if !path.is_dir() {
            self.findings.push(Finding::error(format!(
                "Folder '{}' is declared in the manifest but missing",
                declared
            )));
        }
    }

    /// `filename`, `file` and `folder` children of a file list.
    fn file_list(&mut self, node: &ParsedNode, dir: &Path) {
        self.files(node.children_named("filename"), dir);
        self.files(node.children_named("file"), dir);
        self.folders(node.children_named("folder"), dir);
    }
}

impl XmlFilesRule {
    /// Findings for one manifest; `manifest_dir` is the directory holding it.
    pub fn check_manifest(&self, manifest_dir: &Path, root: &ParsedNode) -> Vec<Finding> {
        let mut missing = Missing::default();

        for tag in ["files", "media", "fonts"] {
            if let Some(node) = root.child(tag) {
                missing.file_list(node, &folder_of(manifest_dir, node));
            }
        }
        if let Some(node) = root.child("languages") {
            missing.files(node.children_named("language"), &folder_of(manifest_dir, node));
        }

        let mut admin_dir = manifest_dir.to_path_buf();
        if let Some(admin) = root.child("administration") {
            if let Some(node) = admin.child("files") {
                admin_dir = folder_of(manifest_dir, node);
                missing.file_list(node, &admin_dir);
            }
            if let Some(node) = admin.child("media") {
                missing.file_list(node, &folder_of(manifest_dir, node));
            }
            if let Some(node) = admin.child("languages") {
                missing.files(node.children_named("language"), &folder_of(manifest_dir, node));
            }
        }

        if let Some(node) = root.descend(&["fileset", "files"]) {
            missing.file_list(node, &folder_of(manifest_dir, node));
        }

        missing.files(root.children_named("scriptfile"), manifest_dir);

        for section in ["install", "uninstall"] {
            if let Some(sql) = root.descend(&[section, "sql"]) {
                missing.files(sql.children_named("file"), &admin_dir);
            }
        }
        if let Some(schemas) = root.descend(&["update", "schemas"]) {
            missing.folders(schemas.children_named("schemapath"), &admin_dir);
        }

        if let Some(config) = root.child("config") {
            if let Some(prefix) = install_path(root) {
                for node in config.descendants() {
                    for attribute in CONFIG_PATH_ATTRIBUTES {
                        let Some(declared) = node.attr(attribute) else {
                            continue;
                        };
                        if let Some(relative) = declared.trim_start_matches('/').strip_prefix(&prefix) {
                            missing.folder(declared, &manifest_dir.join(relative));
                        }
                    }
                }
            }
        }

        missing.findings
    }
}

/// Installed folder name of a module, plugin or template.
///
/// `<element>` wins, then the first `<files>` child carrying the type
/// attribute (never for templates), then `<name>`.
fn install_element(root: &ParsedNode, ty: &str) -> String {
    let raw = root
        .child("element")
        .map(|element| element.text())
        .or_else(|| {
            if ty == "template" {
                return None;
            }
            root.child("files")?
                .children()
                .iter()
                .find_map(|child| child.attr(ty))
        })
        .or_else(|| root.child("name").map(|name| name.text()))
        .unwrap_or_default();

    clean_cmd(raw).to_lowercase()
}

/// Where the installer puts the extension, relative to the site root.
fn install_path(root: &ParsedNode) -> Option<String> {
    let ty = root.attr("type")?;
    let element = install_element(root, ty);
    match ty {
        "module" => Some(format!("modules/{}/", element)),
        "plugin" => Some(format!(
            "plugins/{}/{}/",
            root.attr("group").unwrap_or_default(),
            element
        )),
        "template" => Some(format!("templates/{}/", element)),
        _ => None,
    }
}

impl Rule for XmlFilesRule {
    fn id(&self) -> RuleId {
        RuleId::new("XMLFILES")
    }

    fn title(&self) -> &str {
        "Declared files"
    }

    fn description(&self) -> &str {
        "Checks that files and folders listed in manifests exist in the package"
    }

    fn check(&self, ctx: &RuleContext, report: &mut RuleReport<'_>) -> Result<()> {
        for (path, root) in manifests(ctx) {
            let dir = path.parent().unwrap_or(ctx.base_dir());
            report.add_findings(&path, self.check_manifest(dir, &root));
        }
        Ok(())
    }
}
