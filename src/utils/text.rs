// src/utils/text.rs

/// Characters treated as line boundaries. Covers `\n`, `\r` (so `\r\n` and
/// lone carriage returns both split), vertical tab, form feed and the
/// Unicode line/paragraph separators that PDF text extraction can emit.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Splits raw page text into trimmed, non-empty lines.
pub fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_line_break)
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// First non-empty line of `text`, if any.
pub fn first_line(text: &str) -> Option<&str> {
    non_empty_lines(text).next()
}

/// Joins the first `n` non-empty lines with single spaces.
pub fn join_first_lines(text: &str, n: usize) -> String {
    non_empty_lines(text).take(n).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims_mixed_line_endings() {
        let text = "  Kopf  \r\n\r\n\tZeile zwei\rZeile drei\n\n   \n";
        let lines: Vec<_> = non_empty_lines(text).collect();
        assert_eq!(lines, vec!["Kopf", "Zeile zwei", "Zeile drei"]);
    }

    #[test]
    fn first_line_of_blank_text_is_none() {
        assert_eq!(first_line(""), None);
        assert_eq!(first_line(" \n \t\n"), None);
        assert_eq!(first_line("\n  Titel \n Rest"), Some("Titel"));
    }

    #[test]
    fn joins_at_most_n_lines() {
        assert_eq!(join_first_lines("a\nb\n\nc\nd", 3), "a b c");
        assert_eq!(join_first_lines("nur eine", 3), "nur eine");
        assert_eq!(join_first_lines("", 3), "");
    }
}
