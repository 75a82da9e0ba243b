// src/documents/text.rs
use super::PageSource;
use crate::utils::error::DocumentError;
use std::fs;
use std::path::Path;

const PAGE_BREAK: char = '\u{0c}';

/// Pre-extracted text, pages separated by form feed (as written by
/// `pdftotext` and similar tools).
pub struct TextPageSource;

impl PageSource for TextPageSource {
    fn read_pages(&self, path: &Path) -> Result<Vec<String>, DocumentError> {
        let content = fs::read_to_string(path)?;
        Ok(split_pages(&content))
    }
}

/// An empty file has no pages; a trailing form feed does not open a new one.
fn split_pages(content: &str) -> Vec<String> {
    if content.is_empty() {
        return Vec::new();
    }
    let body = content.strip_suffix(PAGE_BREAK).unwrap_or(content);
    body.split(PAGE_BREAK).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages() {
        assert_eq!(split_pages("a\u{0c}b\u{0c}"), vec!["a", "b"]);
        assert_eq!(split_pages("a\u{0c}\u{0c}c"), vec!["a", "", "c"]);
        assert_eq!(split_pages("nur eine Seite"), vec!["nur eine Seite"]);
        assert!(split_pages("").is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextPageSource.read_pages(&dir.path().join("fehlt.txt")).unwrap_err();
        assert!(matches!(err, DocumentError::Io(_)));
    }
}
