//! Recursive file discovery by file name pattern.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use regex::Regex;
use walkdir::WalkDir;

/// Entries never part of a package: VCS metadata, archiver droppings,
/// dotfiles and editor backups. Ignored directories are not descended.
const IGNORED: [&str; 4] = [".svn", "CVS", ".DS_Store", "__MACOSX"];

fn is_ignored(name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    IGNORED.contains(&name.as_ref()) || name.starts_with('.') || name.ends_with('~')
}

/// Find all regular files below `root` whose file name matches `pattern`.
///
/// Results are sorted so that rule output is stable across platforms.
/// Unreadable and ignored entries are skipped.
pub fn find_files(root: &Path, pattern: &Regex) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_ignored(entry.file_name()))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| pattern.is_match(name))
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}
