//! Escaping for the calendar value grammar (RFC 5545 §3.3.11).
//!
//! Exactly three characters are escapable: backslash, comma, and semicolon.
//! `\n`/`\N` is the literal-newline escape. A backslash that does not start
//! one of those four sequences passes through unchanged, together with the
//! character that follows it.

/// Prefixes every backslash, comma, and semicolon with a backslash.
///
/// Raw CR/LF characters are left untouched; only the writer layer decides
/// how literal newlines are rendered.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | ',' | ';') {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// Resolves the four recognized escape sequences.
///
/// `\\` → `\`, `\,` → `,`, `\;` → `;`, `\n`/`\N` → `"\n"`. Any other
/// backslash sequence is kept as-is. A trailing lone backslash is kept.
#[must_use]
pub fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n' | 'N') => result.push('\n'),
                Some(escaped @ ('\\' | ',' | ';')) => result.push(escaped),
                Some(other) => {
                    // Unrecognized escape, preserved verbatim
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_specials() {
        let actual = escape("One; Two, Three\\ Four\n Five\r\n Six\r");
        assert_eq!(actual, "One\\; Two\\, Three\\\\ Four\n Five\r\n Six\r");
    }

    #[test]
    fn unescape_recognized_sequences() {
        let actual = unescape("\\\\ \\, \\; \\n \\\\\\,");
        assert_eq!(actual, "\\ , ; \n \\,");
    }

    #[test]
    fn unescape_upper_newline() {
        assert_eq!(unescape("line1\\Nline2"), "line1\nline2");
    }

    #[test]
    fn unescape_unrecognized_passes_through() {
        assert_eq!(unescape("a\\xb"), "a\\xb");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }

    #[test]
    fn round_trip_over_escapable_alphabet() {
        for s in ["", "\\", ",", ";", "a,b;c\\d", "x\ny", ",,;;\\\\"] {
            assert_eq!(unescape(&escape(s)), s);
        }
    }
}
