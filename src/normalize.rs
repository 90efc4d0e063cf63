//! Input normalization for evasion resistance
//!
//! Trivial obfuscation (leetspeak digits, zero-width characters, stretched
//! whitespace) defeats literal pattern matching. The gate matches the raw
//! input first, then this normalized form.

/// Normalize text for a second matching pass.
///
/// Lowercases, strips zero-width characters, maps common leetspeak
/// substitutions back to letters, and collapses whitespace runs.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = false;

    for c in text.to_lowercase().chars() {
        let mapped = match c {
            // Zero-width characters split keywords invisibly
            '\u{200b}' | '\u{200c}' | '\u{200d}' | '\u{2060}' | '\u{feff}' => continue,
            '0' => 'o',
            '1' => 'i',
            '3' => 'e',
            '4' => 'a',
            '5' => 's',
            '7' => 't',
            '8' => 'b',
            '@' => 'a',
            '$' => 's',
            c if c.is_whitespace() => ' ',
            c => c,
        };

        if mapped == ' ' {
            if last_was_space {
                continue;
            }
            last_was_space = true;
        } else {
            last_was_space = false;
        }

        out.push(mapped);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_roundtrip() {
        assert_eq!(normalize("hello world"), "hello world");
    }

    #[test]
    fn test_lowercases() {
        assert_eq!(normalize("Ignore Previous"), "ignore previous");
    }

    #[test]
    fn test_leetspeak_mapped() {
        assert_eq!(normalize("1gn0re pr3v10us"), "ignore previous");
        assert_eq!(normalize("sy5tem pr0mpt"), "system prompt");
    }

    #[test]
    fn test_zero_width_stripped() {
        assert_eq!(normalize("sys\u{200b}tem prompt"), "system prompt");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(normalize("ignore \t\n previous"), "ignore previous");
    }
}
