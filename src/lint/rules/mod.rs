//! Built-in rules.
//!
//! This module contains all the checks that come with jedcheck.

pub mod encoding;
pub mod language;
pub mod manifest;
pub mod xml_files;
pub mod xml_info;

pub use encoding::EncodingRule;
pub use language::LanguageRule;
pub use manifest::ManifestRule;
pub use xml_files::XmlFilesRule;
pub use xml_info::XmlInfoRule;

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use super::rule::RuleContext;
use crate::manifest::{load_manifest, ParsedNode};

static XML_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.xml$").expect("XML_FILE must compile"));

/// Every extension manifest below the base directory, in path order.
pub(crate) fn manifests(ctx: &RuleContext) -> Vec<(PathBuf, ParsedNode)> {
    ctx.files(&XML_FILE)
        .into_iter()
        .filter_map(|path| load_manifest(&path).map(|root| (path, root)))
        .collect()
}
