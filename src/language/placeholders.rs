//! printf-style placeholders in translated strings.

/// Placeholders found in one decoded value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderSet {
    total: usize,
    numbers: Vec<usize>,
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl PlaceholderSet {
    /// Collect placeholders from a value.
    ///
    /// A placeholder starts at a `%` that is not preceded by another `%`
    /// and is followed by a word character, optionally after one flag
    /// (`-`, `+`, `0` or space). It is numbered when the `%` is directly
    /// followed by digits.
    pub fn scan(value: &str) -> Self {
        let bytes = value.as_bytes();
        let mut set = Self::default();

        for (i, &b) in bytes.iter().enumerate() {
            if b != b'%' || (i > 0 && bytes[i - 1] == b'%') {
                continue;
            }

            let starts = match bytes.get(i + 1) {
                Some(&next) if is_word(next) => true,
                Some(b'-' | b'+' | b' ') => bytes.get(i + 2).is_some_and(|&c| is_word(c)),
                _ => false,
            };
            if !starts {
                continue;
            }
            set.total += 1;

            let digits = bytes[i + 1..]
                .iter()
                .take_while(|c| c.is_ascii_digit())
                .count();
            if digits > 0 {
                let number = value[i + 1..i + 1 + digits]
                    .parse()
                    .unwrap_or(usize::MAX);
                set.numbers.push(number);
            }
        }

        set
    }

    /// Number of placeholders of any kind.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Argument numbers of numbered placeholders, in order of appearance.
    pub fn numbers(&self) -> &[usize] {
        &self.numbers
    }

    /// True when every placeholder is numbered, there are at least two, and
    /// the highest number equals the number of placeholders.
    pub fn is_numbered_sequence(&self) -> bool {
        let count = self.numbers.len();
        count == self.total
            && count > 1
            && self.numbers.iter().copied().max() == Some(count)
    }
}
