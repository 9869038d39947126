//! Escape-aware tokenization.

use super::escape::unescape;

/// A token produced by the splitter: a string, or `None` when a field's
/// emptiness is configured to mean "absent" rather than "blank".
pub type Token = Option<String>;

/// Escape-aware string splitter with configurable policies.
///
/// A delimiter preceded by a backslash is never a split point. Each token is
/// trimmed of leading and trailing whitespace.
///
/// ```
/// use koyomi_core::grammar::Splitter;
///
/// let tokens = Splitter::new(',').unescape(true).split("one,two\\,three");
/// assert_eq!(tokens, vec![Some("one".into()), Some("two,three".into())]);
/// ```
#[derive(Debug, Clone)]
pub struct Splitter {
    delimiter: char,
    limit: Option<usize>,
    unescape: bool,
    nullify_empty: bool,
}

impl Splitter {
    /// Creates a splitter for the given delimiter with all policies off.
    #[must_use]
    pub const fn new(delimiter: char) -> Self {
        Self {
            delimiter,
            limit: None,
            unescape: false,
            nullify_empty: false,
        }
    }

    /// Caps the number of returned tokens at `limit`.
    ///
    /// The last token absorbs the remainder of the input, including any
    /// further unescaped delimiters. Has no effect if `limit` is at least
    /// the natural token count.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Applies [`unescape`](super::unescape) to every token.
    #[must_use]
    pub const fn unescape(mut self, unescape: bool) -> Self {
        self.unescape = unescape;
        self
    }

    /// Maps empty tokens to the absence marker instead of the empty string.
    #[must_use]
    pub const fn nullify_empty(mut self, nullify_empty: bool) -> Self {
        self.nullify_empty = nullify_empty;
        self
    }

    /// Splits `text` into tokens.
    ///
    /// Splitting an empty input yields a single empty token.
    #[must_use]
    pub fn split(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut escaped = false;

        for c in text.chars() {
            if escaped {
                current.push(c);
                escaped = false;
            } else if c == '\\' {
                current.push(c);
                escaped = true;
            } else if c == self.delimiter && self.limit.is_none_or(|n| tokens.len() + 1 < n) {
                tokens.push(self.finish(&current));
                current.clear();
            } else {
                current.push(c);
            }
        }
        tokens.push(self.finish(&current));

        tokens
    }

    fn finish(&self, raw: &str) -> Token {
        let trimmed = raw.trim();
        if self.nullify_empty && trimmed.is_empty() {
            return None;
        }
        if self.unescape {
            Some(unescape(trimmed))
        } else {
            Some(trimmed.to_string())
        }
    }
}
