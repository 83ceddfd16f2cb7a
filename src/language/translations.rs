//! Key lookup in translation files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::linter::parse;
use super::read_lines;

/// Translated strings loaded from one or more `.ini` files.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    strings: HashMap<String, String>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the well-formed entries of a translation file. Later
    /// definitions of a key win, as in the ini parser.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut translations = Self::new();
        translations.extend_from_lines(lines);
        translations
    }

    /// Add the entries of another file, overriding existing keys.
    pub fn extend_from_lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        for entry in parse(lines).entries {
            if let Some(text) = decode(&entry.value) {
                self.strings.insert(entry.key.to_ascii_uppercase(), text);
            }
        }
    }

    /// Load a translation file from disk. Unreadable files add nothing.
    pub fn extend_from_file(&mut self, path: &Path) -> bool {
        match fs::read(path) {
            Ok(bytes) => {
                self.extend_from_lines(&read_lines(&bytes));
                tracing::debug!("Loaded translations from {}", path.display());
                true
            }
            Err(e) => {
                tracing::debug!("Cannot read {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Translate a key. Unknown keys are returned unchanged.
    pub fn translate(&self, key: &str) -> String {
        self.strings
            .get(&key.to_ascii_uppercase())
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Text of a double-quoted value with escapes resolved.
fn decode(value: &str) -> Option<String> {
    let inner = value.strip_prefix('"')?.strip_suffix('"')?;
    Some(inner.replace("\"_QQ_\"", "\"").replace("\\\"", "\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn translates_known_keys_case_insensitively() {
        let translations = Translations::from_lines(&[
            "MOD_HELLO=\"Hello World\"",
            "MOD_HELLO_XML_DESCRIPTION=\"Says \\\"hello\\\"\"",
        ]);
        assert_eq!(translations.translate("mod_hello"), "Hello World");
        assert_eq!(
            translations.translate("MOD_HELLO_XML_DESCRIPTION"),
            "Says \"hello\""
        );
    }

    #[test]
    fn unknown_key_is_returned_unchanged() {
        let translations = Translations::new();
        assert_eq!(translations.translate("Plain Name"), "Plain Name");
    }

    #[test]
    fn unquoted_and_broken_entries_are_ignored() {
        let translations = Translations::from_lines(&["A=bare", "B=\"ok\"", "C=\"open"]);
        assert_eq!(translations.len(), 1);
        assert_eq!(translations.translate("A"), "A");
    }

    #[test]
    fn later_definition_wins() {
        let translations = Translations::from_lines(&["A=\"one\"", "A=\"two\""]);
        assert_eq!(translations.translate("A"), "two");
    }

    #[test]
    fn legacy_quote_token_is_decoded() {
        let translations = Translations::from_lines(&["A=\"x \"_QQ_\"y\"_QQ_\"\""]);
        assert_eq!(translations.translate("A"), "x \"y\"");
    }

    #[test]
    fn loads_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("en-GB.mod_hello.sys.ini");
        std::fs::write(&path, "\u{FEFF}MOD_HELLO=\"Hello\"\r\n").unwrap();

        let mut translations = Translations::new();
        assert!(translations.extend_from_file(&path));
        assert!(!translations.extend_from_file(&temp.path().join("missing.ini")));
        assert_eq!(translations.translate("MOD_HELLO"), "Hello");
    }
}
