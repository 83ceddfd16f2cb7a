//! Translation (`.ini`) files.
//!
//! - [`linter`] - line checks over a whole file
//! - [`value`] - quote-aware value scanning across lines
//! - [`placeholders`] - printf-style placeholder analysis
//! - [`translations`] - key lookup for manifest strings
//!
//! # Example
//!
//! ```
//! use jedcheck::language::lint;
//! use jedcheck::lint::Severity;
//!
//! let findings = lint(&["MOD_HELLO=\"Hello\"", "mod hello = \"x\""]);
//!
//! assert_eq!(findings.len(), 1);
//! assert_eq!(findings[0].severity, Severity::Error);
//! assert_eq!(findings[0].line, Some(2));
//! ```

pub mod linter;
pub mod placeholders;
pub mod translations;
pub mod value;

pub use linter::{lint, parse, IniEntry, ParsedIni};
pub use placeholders::PlaceholderSet;
pub use translations::Translations;
pub use value::{split_value, ValueScanner};

/// Whitespace stripped from both ends of every line.
pub const INI_WHITESPACE: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Trim ini whitespace from both ends.
pub fn trim_ini(s: &str) -> &str {
    s.trim_matches(INI_WHITESPACE)
}

/// Split raw file bytes into lines. Invalid UTF-8 is replaced, line
/// terminators are `\n` with an optional `\r` left for trimming.
pub fn read_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .split('\n')
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_ini_strips_php_whitespace_only() {
        assert_eq!(trim_ini("\0\x0B \tKEY\r\n"), "KEY");
        assert_eq!(trim_ini("\u{A0}KEY"), "\u{A0}KEY");
    }

    #[test]
    fn read_lines_keeps_line_count() {
        let lines = read_lines(b"A=\"1\"\r\nB=\"2\"\n");
        assert_eq!(lines, vec!["A=\"1\"\r", "B=\"2\"", ""]);
    }

    #[test]
    fn read_lines_is_lossy() {
        let lines = read_lines(b"A=\"\xff\"");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains('\u{FFFD}'));
    }
}
