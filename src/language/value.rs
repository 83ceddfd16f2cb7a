//! Quote-aware scanning of translation values.
//!
//! A value is a sequence of tokens:
//!
//! - a single-quoted run `'...'`, backslash escapes allowed
//! - a double-quoted run `"..."`, backslash escapes allowed
//! - an unquoted run without quotes and without `;`
//!
//! optionally followed by a `;` comment that runs to the end of the text.
//! A value is complete when the scanner is outside any quote. Text is fed in
//! chunks as physical lines are appended, and each byte is looked at once.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    Single,
    SingleEscape,
    Double,
    DoubleEscape,
    Comment,
    /// The text can never become a valid value, whatever is appended.
    Invalid,
}

/// Incremental scanner for one logical value.
#[derive(Debug, Clone)]
pub struct ValueScanner {
    state: State,
    len: usize,
    comment_start: Option<usize>,
}

impl Default for ValueScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueScanner {
    pub fn new() -> Self {
        Self {
            state: State::Outside,
            len: 0,
            comment_start: None,
        }
    }

    /// Scan the next piece of the value text.
    pub fn feed(&mut self, chunk: &str) {
        for (offset, c) in chunk.char_indices() {
            self.state = match (self.state, c) {
                (State::Invalid, _) => State::Invalid,
                (State::Outside, '\'') => State::Single,
                (State::Outside, '"') => State::Double,
                (State::Outside, ';') => {
                    self.comment_start = Some(self.len + offset);
                    State::Comment
                }
                (State::Outside, _) => State::Outside,
                (State::Single, '\\') => State::SingleEscape,
                (State::Single, '\'') => State::Outside,
                (State::Single, _) => State::Single,
                (State::Double, '\\') => State::DoubleEscape,
                (State::Double, '"') => State::Outside,
                (State::Double, _) => State::Double,
                // An escape or a comment cannot span a line break.
                (State::SingleEscape | State::DoubleEscape | State::Comment, '\n') => {
                    State::Invalid
                }
                (State::SingleEscape, _) => State::Single,
                (State::DoubleEscape, _) => State::Double,
                (State::Comment, _) => State::Comment,
            };
        }
        self.len += chunk.len();
    }

    /// Whether the text fed so far forms a complete value.
    pub fn is_complete(&self) -> bool {
        matches!(self.state, State::Outside | State::Comment)
    }

    /// Byte length of the value part (comment excluded), once complete.
    pub fn value_end(&self) -> Option<usize> {
        if !self.is_complete() {
            return None;
        }
        Some(self.comment_start.unwrap_or(self.len))
    }
}

/// Scan a whole value at once. Returns the value part without the comment,
/// or `None` when quotes are unbalanced.
pub fn split_value(text: &str) -> Option<&str> {
    let mut scanner = ValueScanner::new();
    scanner.feed(text);
    scanner.value_end().map(|end| &text[..end])
}
