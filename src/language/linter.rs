//! Line-oriented linting of `.ini` translation files.

use std::collections::HashMap;

use super::placeholders::PlaceholderSet;
use super::value::ValueScanner;
use super::{trim_ini, INI_WHITESPACE};
use crate::lint::Finding;

const BOM: char = '\u{FEFF}';

/// Characters that are not allowed anywhere in a key.
const FORBIDDEN_KEY_CHARS: &[char] = &['{', '}', '|', '&', '~', '!', '[', '(', ')', '^', '"'];

/// Words the ini parser turns into booleans or null; matched case-sensitively.
const RESERVED_KEYS: [&str; 8] = ["null", "yes", "no", "true", "false", "on", "off", "none"];

/// Legacy escape token for a double quote inside a value.
const QQ_TOKEN: &str = "\"_QQ_\"";

/// A key/value entry recognised while linting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniEntry {
    pub key: String,
    /// 1-based line on which the entry starts.
    pub line: usize,
    /// Value text without comment or surrounding whitespace; still quoted.
    pub value: String,
}

/// Everything learned from one pass over a file.
#[derive(Debug, Clone, Default)]
pub struct ParsedIni {
    pub findings: Vec<Finding>,
    pub entries: Vec<IniEntry>,
}

/// Lint the lines of a translation file.
pub fn lint<S: AsRef<str>>(lines: &[S]) -> Vec<Finding> {
    parse(lines).findings
}

/// Lint the lines of a translation file, keeping the recognised entries.
///
/// Lines are processed in order. A value with an unbalanced quote swallows
/// the following lines until it balances or the file ends, and those lines
/// are not inspected on their own.
pub fn parse<S: AsRef<str>>(lines: &[S]) -> ParsedIni {
    let mut out = ParsedIni::default();
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut next = 0;

    while next < lines.len() {
        let start = next + 1;
        let mut line = trim_ini(lines[next].as_ref()).to_string();
        next += 1;

        if start == 1 {
            if let Some(rest) = line.strip_prefix(BOM) {
                let mut finding = match rest.chars().next() {
                    None | Some(';' | '\n' | '\r') => {
                        Finding::warning("File starts with a byte order mark")
                    }
                    Some(_) => Finding::error(
                        "Byte order mark in front of the first entry, it becomes part of the key",
                    ),
                };
                finding.line = Some(start);
                out.findings.push(finding);
                line = rest.to_string();
            }
        }

        if line.is_empty() || line.starts_with(';') || line.starts_with('[') {
            continue;
        }

        if line.starts_with('#') {
            out.findings
                .push(Finding::error("Lines starting with '#' are not comments, use ';'").at(start, &line));
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            out.findings
                .push(Finding::error("Wrong line format, expected KEY=\"value\"").at(start, &line));
            continue;
        };
        let key = key.trim_end_matches(INI_WHITESPACE).to_string();
        let mut value = value.trim_start_matches(INI_WHITESPACE).to_string();

        if let Some(message) = key_error(&key) {
            out.findings.push(Finding::error(message).at(start, &line));
            continue;
        }

        if key.chars().any(|c| c < ' ' || !c.is_ascii()) {
            out.findings.push(
                Finding::warning(format!("Key '{}' contains non-ASCII or control characters", key))
                    .at(start, &line),
            );
        }
        if key != key.to_ascii_uppercase() {
            out.findings.push(
                Finding::warning(format!("Key '{}' should be upper case", key)).at(start, &line),
            );
        }
        match first_seen.get(&key) {
            Some(&first) => out.findings.push(
                Finding::warning(format!("Key '{}' is already defined on line {}", key, first))
                    .at(start, &line),
            ),
            None => {
                first_seen.insert(key.clone(), start);
            }
        }

        let mut scanner = ValueScanner::new();
        scanner.feed(&value);
        while !scanner.is_complete() && next < lines.len() {
            let chunk = format!("\n{}", trim_ini(lines[next].as_ref()));
            next += 1;
            scanner.feed(&chunk);
            line.push_str(&chunk);
            value.push_str(&chunk);
        }

        let Some(end) = scanner.value_end() else {
            out.findings.push(
                Finding::warning("Translation cannot be parsed, check the quotes").at(start, &line),
            );
            continue;
        };
        let value = trim_ini(&value[..end]);

        check_value(value, start, &line, &mut out.findings);
        out.entries.push(IniEntry {
            key,
            line: start,
            value: value.to_string(),
        });
    }

    out
}

fn key_error(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Empty key".to_string());
    }
    if key.contains(' ') {
        return Some(format!("Key '{}' contains a space", key));
    }
    if key.contains(FORBIDDEN_KEY_CHARS) {
        return Some(format!(
            "Key '{}' contains an invalid character, none of {{}}|&~![()^\" are allowed",
            key
        ));
    }
    if RESERVED_KEYS.contains(&key) {
        return Some(format!("Key '{}' is a reserved word", key));
    }
    None
}

fn check_value(value: &str, line_no: usize, line: &str, findings: &mut Vec<Finding>) {
    if value == "\"\"" {
        findings.push(Finding::info("Empty translation").at(line_no, line));
        return;
    }

    if value.len() < 2 || !value.starts_with('"') || !value.ends_with('"') {
        findings.push(Finding::error("Translation must be enclosed in double quotes").at(line_no, line));
        return;
    }

    let inner = &value[1..value.len() - 1];
    let decoded = if inner.contains(QQ_TOKEN) {
        findings.push(
            Finding::compat(format!("{} is deprecated, use \\\" instead", QQ_TOKEN)).at(line_no, line),
        );
        inner.replace(QQ_TOKEN, "\\\"")
    } else {
        inner.to_string()
    };

    if decoded
        .as_bytes()
        .windows(2)
        .any(|pair| pair[1] == b'"' && pair[0] != b'\\')
    {
        findings.push(Finding::warning("Unescaped double quote inside the translation").at(line_no, line));
    }

    if decoded.contains("${") {
        findings.push(
            Finding::warning("'${' starts a variable expansion in the ini parser").at(line_no, line),
        );
    }

    if PlaceholderSet::scan(&decoded).is_numbered_sequence() {
        findings.push(
            Finding::warning("Numbered placeholders are in natural order, plain %s would do")
                .at(line_no, line),
        );
    }
}
